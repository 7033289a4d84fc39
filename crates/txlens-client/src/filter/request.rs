use crate::filter::FilterRequest;
use crate::{ClientError, ClientResult};

/// Builds a request from `column=value` and `column=min..max` clauses.
///
/// Repeated `where` clauses on one column accumulate accepted values.
pub fn build_request(
    where_clauses: &[String],
    range_clauses: &[String],
) -> ClientResult<FilterRequest> {
    let mut request = FilterRequest::default();

    for clause in where_clauses {
        let (column, value) = split_clause(clause)?;
        request = request.with_values(column, [value]);
    }

    for clause in range_clauses {
        let (column, bounds) = split_clause(clause)?;
        if request.ranges.contains_key(column) {
            return Err(ClientError::invalid_filter(
                &format!("Range for `{column}` was given more than once."),
                clause,
            ));
        }
        let Some((min_raw, max_raw)) = bounds.split_once("..") else {
            return Err(ClientError::invalid_filter(
                &format!("Range clause `{clause}` must look like `<column>=<min>..<max>`."),
                clause,
            ));
        };
        let min = parse_bound(min_raw, clause)?;
        let max = parse_bound(max_raw, clause)?;
        request = request.with_range(column, min, max);
    }

    Ok(request)
}

fn split_clause(clause: &str) -> ClientResult<(&str, &str)> {
    let Some((column, value)) = clause.split_once('=') else {
        return Err(ClientError::invalid_filter(
            &format!("Filter clause `{clause}` is missing `=`."),
            clause,
        ));
    };
    let column = column.trim();
    if column.is_empty() {
        return Err(ClientError::invalid_filter(
            &format!("Filter clause `{clause}` has an empty column name."),
            clause,
        ));
    }
    Ok((column, value))
}

fn parse_bound(raw: &str, clause: &str) -> ClientResult<f64> {
    let parsed = raw.trim().parse::<f64>().ok().filter(|value| value.is_finite());
    parsed.ok_or_else(|| {
        ClientError::invalid_filter(
            &format!("Range bound `{}` in `{clause}` is not a number.", raw.trim()),
            clause,
        )
    })
}

use std::fs;
use std::io::{IsTerminal, Read};

use crate::table::{Table, read_csv};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum SourceKind {
    File,
    Stdin,
}

impl SourceKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Stdin => "stdin",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct LoadedSource {
    pub(crate) source_kind: SourceKind,
    pub(crate) source_ref: Option<String>,
    pub(crate) table: Table,
}

/// Reads the CSV named by `path`, or stdin when `path` is `-` or absent.
///
/// `stdin_override` stands in for piped stdin.
pub(crate) fn load_table(
    path: Option<&str>,
    stdin_override: Option<&[u8]>,
    command: &str,
) -> ClientResult<LoadedSource> {
    match path {
        Some(path_value) if path_value != "-" => {
            let body = fs::read(path_value).map_err(|error| {
                ClientError::invalid_argument_with_recovery(
                    &format!("Could not read CSV file `{path_value}`: {error}"),
                    vec![
                        "Verify the path exists and is readable.".to_string(),
                        format!("Rerun `txlens {command} <path>`."),
                    ],
                )
            })?;
            Ok(LoadedSource {
                source_kind: SourceKind::File,
                source_ref: Some(path_value.to_string()),
                table: read_csv(&body)?,
            })
        }
        _ => {
            let Some(body) = read_stdin(stdin_override)? else {
                return Err(ClientError::invalid_argument_with_recovery(
                    "No CSV input provided. Pass a file path or pipe CSV via stdin.",
                    vec![
                        format!("Run `txlens {command} <path>`."),
                        format!("Or pipe a file: `cat rows.csv | txlens {command} -`."),
                    ],
                ));
            };
            Ok(LoadedSource {
                source_kind: SourceKind::Stdin,
                source_ref: None,
                table: read_csv(&body)?,
            })
        }
    }
}

fn read_stdin(stdin_override: Option<&[u8]>) -> ClientResult<Option<Vec<u8>>> {
    if let Some(value) = stdin_override {
        return Ok(non_blank(value.to_vec()));
    }

    if std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let mut buffer = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buffer)
        .map_err(|error| {
            ClientError::invalid_argument_with_recovery(
                &format!("Could not read stdin: {error}"),
                vec![
                    "Retry with an explicit file path argument.".to_string(),
                    "Or rerun with valid stdin content.".to_string(),
                ],
            )
        })?;

    Ok(non_blank(buffer))
}

fn non_blank(body: Vec<u8>) -> Option<Vec<u8>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    Some(body)
}

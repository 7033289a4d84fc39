use crate::config::{
    ASSET_AMOUNT_FIELD, ASSET_FIELD, FEE_AMOUNT_FIELD, FEE_ASSET_FIELD, FieldAliases,
    OPERATION_FIELD, WALLET_FIELD,
};
use crate::schema::{resolve_date_column, resolve_field};
use crate::table::Table;
use crate::{ClientError, ClientResult};

/// Column positions the aggregation reads, resolved once per table.
#[derive(Debug, Clone)]
pub(crate) struct LedgerColumns {
    pub(crate) wallet: usize,
    pub(crate) asset: usize,
    pub(crate) fee_asset: usize,
    pub(crate) operation: usize,
    pub(crate) asset_amount: usize,
    pub(crate) asset_amount_name: String,
    pub(crate) fee_amount: usize,
    pub(crate) fee_amount_name: String,
    pub(crate) date: usize,
    pub(crate) date_name: String,
}

pub(crate) fn resolve(table: &Table, aliases: &FieldAliases) -> ClientResult<LedgerColumns> {
    let headers = table.headers();
    let Some((date, date_name)) = resolve_date_column(headers, aliases)
        .and_then(|name| table.column_index(&name).map(|index| (index, name)))
    else {
        return Err(ClientError::missing_date_column(headers));
    };

    let (wallet, _) = required(table, aliases, WALLET_FIELD)?;
    let (asset, asset_name) = required(table, aliases, ASSET_FIELD)?;
    let (fee_asset, _) = required(table, aliases, FEE_ASSET_FIELD)?;
    let (operation, _) = required(table, aliases, OPERATION_FIELD)?;
    let (asset_amount, asset_amount_name) = required(table, aliases, ASSET_AMOUNT_FIELD)?;
    let (fee_amount, fee_amount_name) = required(table, aliases, FEE_AMOUNT_FIELD)?;

    log::debug!("resolved date column `{date_name}` and asset column `{asset_name}`");

    Ok(LedgerColumns {
        wallet,
        asset,
        fee_asset,
        operation,
        asset_amount,
        asset_amount_name,
        fee_amount,
        fee_amount_name,
        date,
        date_name,
    })
}

fn required(
    table: &Table,
    aliases: &FieldAliases,
    canonical: &str,
) -> ClientResult<(usize, String)> {
    let accepted = aliases.aliases_for(canonical);
    resolve_field(table.headers(), canonical, &accepted)
        .and_then(|name| table.column_index(&name).map(|index| (index, name)))
        .ok_or_else(|| ClientError::missing_required_column(canonical, &accepted, table.headers()))
}

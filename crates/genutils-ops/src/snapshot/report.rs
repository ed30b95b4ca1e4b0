use std::io::Write;

use crate::error::OpsError;
use crate::snapshot::rank::StakedAccount;

pub const CSV_HEADER: [&str; 3] = ["address", "staked_value", "usd_value"];

/// Write the snapshot as CSV, one row per account
pub fn write_snapshot_csv<W: Write>(writer: W, accounts: &[StakedAccount]) -> Result<(), OpsError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(CSV_HEADER)?;
    for account in accounts {
        let staked = account.staked.to_string();
        let usd_value = account.usd_value.to_string();
        out.write_record([account.address.as_str(), staked.as_str(), usd_value.as_str()])?;
    }
    out.flush()?;
    Ok(())
}

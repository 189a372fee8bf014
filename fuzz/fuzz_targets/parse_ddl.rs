#![no_main]

use ddlscope_core::{parse_ddl, Dialect, NameCase};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(ddl) = std::str::from_utf8(data) {
        if let Ok(table) = parse_ddl(ddl, Some(Dialect::Postgresql)) {
            let _ = table.to_bigquery_fields(NameCase::Lower);
            let _ = table.to_bigquery_ddl(NameCase::Original);
        }
    }
});

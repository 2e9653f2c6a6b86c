//! Fuzz target for cleaning and analysis.
//!
//! Whatever parses must clean without panicking, for every table kind, and
//! the analyzers must either succeed or report a missing column.

#![no_main]

use libfuzzer_sys::fuzz_target;
use wardstat::input::Parser;
use wardstat::transform::TransformEngine;
use wardstat::{
    FinanceAnalysis, OperationsAnalysis, PatientAnalysis, ProfitCutoff, StaffAnalysis, TableKind,
};

fuzz_target!(|data: &[u8]| {
    if data.len() > 50_000 {
        return;
    }

    let Ok(table) = Parser::new().parse_bytes("fuzz", data, b';') else {
        return;
    };

    let engine = TransformEngine::new();
    for kind in TableKind::ALL {
        let mut t = table.clone();
        if engine.clean(kind, &mut t).is_err() {
            continue;
        }
        let _ = match kind {
            TableKind::Patients => PatientAnalysis::analyze(&t).map(|_| ()),
            TableKind::Staff => StaffAnalysis::analyze(&t).map(|_| ()),
            TableKind::Operations => OperationsAnalysis::analyze(&t, 0.9).map(|_| ()),
            TableKind::Finance => FinanceAnalysis::analyze(&mut t, ProfitCutoff::Mean).map(|_| ()),
        };
    }
});

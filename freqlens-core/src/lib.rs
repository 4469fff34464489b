pub mod binning;
pub mod export;
pub mod samples;

pub use freqlens_common::{BinningConfig, FreqLensError, Result};
pub use binning::{compute, compute_samples, effective_k, interval_width, sturges_k, Distribution, Interval, LAST_EDGE_PAD};
pub use export::{
    export, export_csv, export_json, fmt_pct, fmt_real, interval_label, print_summary, print_table,
    write_summary, write_table,
};
pub use samples::{parse_samples, read_raw_input, read_raw_stdin, rejected_tokens};

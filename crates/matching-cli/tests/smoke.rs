use matching_cli::{run, Args};
use std::io::Write;
use std::path::PathBuf;

#[test]
fn end_to_end_smoke_over_a_temp_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# smoke test batch").unwrap();
    writeln!(file, "N, 1, IBM, 10, 100, B, 1").unwrap();
    writeln!(file, "N, 2, IBM, 9, 50, S, 2").unwrap();
    writeln!(file, "C, 1, 1").unwrap();
    writeln!(file, "F").unwrap();
    file.flush().unwrap();

    let args = Args {
        input: PathBuf::from(file.path()),
        event_buffer: matching_core::prelude::DEFAULT_EVENT_BUFFER,
        verbose: false,
    };

    let mut out = Vec::new();
    run(&args, &mut out).expect("a well-formed batch should not fail the run");
    let rendered = String::from_utf8(out).unwrap();
    assert!(!rendered.is_empty());
}

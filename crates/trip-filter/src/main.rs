use std::process::ExitCode;

fn main() -> ExitCode {
    trip_filter::run_native()
}

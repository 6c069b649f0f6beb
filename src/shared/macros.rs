/***************************************/
/*               Macros                */
/***************************************/
/// Unwraps a `Result` in the binary, logging the error and exiting with status 1.
/// The optional second argument names the step that failed.
#[macro_export]
macro_rules! unwrap_or_exit {
    ($expr:expr) => {
        $crate::unwrap_or_exit!($expr, "simulation")
    };
    ($expr:expr, $step:expr) => {
        match $expr {
            Ok(val) => val,
            Err(e) => {
                log::error!("ERROR: {} failed: {}", $step, e);
                std::process::exit(1);
            }
        }
    };
}

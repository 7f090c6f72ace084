/// Intercept messages using the `log` crate and print them to STDERR. The default level is
/// `info`; override it with `RUST_LOG`.
pub fn setup() {
    use env_logger::{Builder, Env};
    // Tests and tools may both try to set this up
    let _ = Builder::from_env(Env::default().default_filter_or("info")).try_init();
}

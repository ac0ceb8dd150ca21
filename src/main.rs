use miette::Result;

/// Main entry point for the barter-wheel CLI tool
fn main() -> Result<()> {
    // Install miette's panic and error handler for beautiful error reporting
    miette::set_panic_hook();

    barter_wheel::run()
}

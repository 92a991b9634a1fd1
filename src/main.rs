use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use robot_face::{
    app, display::Display, inbox, transport, Cli, ExpressionLibrary, ExpressionPlayer, Options,
};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let options = cli.merge_into_options(Options::default());

    tracing::info!(
        path = %options.expressions_dir.display(),
        default = options.default_expression.as_str(),
        frame_delay_ms = options.frame_delay.as_millis() as u64,
        "Starting robot face player"
    );

    // Fatal configuration problems must abort before any window is shown.
    let library = ExpressionLibrary::load(&options.expressions_dir)
        .context("Failed to load expression library")?;
    tracing::info!(
        expressions = ?library.names().collect::<Vec<_>>(),
        "Expressions found"
    );

    let (sender, receiver) = inbox::inbox();
    let _transport = transport::spawn_stdin_reader(sender)
        .context("Failed to start transport thread")?;

    let mut display = Display::open(options.windowed).context("Failed to open display")?;
    let mut player = ExpressionPlayer::new(
        library,
        receiver,
        &options.default_expression,
        options.frame_delay,
    );

    app::run(&mut player, &mut display)?;
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

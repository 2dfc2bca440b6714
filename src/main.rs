//! Binary entry point: opens a viewer window in continuous animation.

use molview::host::WindowViewer;

fn main() {
    env_logger::init();

    let title = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "molview".into());

    if let Err(e) = WindowViewer::builder().with_title(title).build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

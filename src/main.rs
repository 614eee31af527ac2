#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("The portfolio controller only runs in the browser. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    portfolio::frontend::run();
}

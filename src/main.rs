#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This crate enhances the portfolio page in the browser. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    portfolio_enhance::frontend::run();
}

// The native binary is only a trunk hint; the page logic runs in wasm.
#![cfg_attr(all(not(target_arch = "wasm32"), not(test)), allow(dead_code))]

mod config;
mod easter_egg;
mod entries;
mod error;
mod language;
mod lifecycle;
mod log;
mod markup;
mod modal;
mod particles;
mod projects;
mod reveal;
mod scroll;
mod typing;

#[cfg(target_arch = "wasm32")]
mod frontend;
#[cfg(target_arch = "wasm32")]
mod modal_host;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This crate drives the portfolio page in the browser. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}

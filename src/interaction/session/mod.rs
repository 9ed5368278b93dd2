pub mod auto_close;
#[cfg(not(any(target_arch = "wasm32", feature = "embedded_config")))]
pub mod config_hot_reload;

pub fn set_panic_hook() {
    // Forwards panic messages to the browser console when the
    // `console_error_panic_hook` feature is enabled.
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

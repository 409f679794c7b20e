//! About dialog text

/// Static content of the about dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AboutInfo {
    pub title: &'static str,
    pub message: &'static str,
    /// Label of the single button that closes the dialog
    pub dismiss_label: &'static str,
}

pub const ABOUT: AboutInfo = AboutInfo {
    title: "About",
    message: concat!(
        "Temperature Converter ",
        env!("CARGO_PKG_VERSION"),
        "\nConvert between Celsius, Fahrenheit and Kelvin.\nAuthor: ",
        env!("CARGO_PKG_AUTHORS"),
    ),
    dismiss_label: "OK",
};

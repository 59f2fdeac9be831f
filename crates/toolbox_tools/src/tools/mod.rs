pub mod base64_codec;
pub mod color;
pub mod json_format;
pub mod markdown;
pub mod password;
pub mod qr_code;
pub mod timestamp;
pub mod url_codec;

pub use base64_codec::Base64Tool;
pub use color::ColorTool;
pub use json_format::JsonFormatTool;
pub use markdown::MarkdownTool;
pub use password::PasswordTool;
pub use qr_code::QrCodeTool;
pub use timestamp::TimestampTool;
pub use url_codec::UrlCodecTool;

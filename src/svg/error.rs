use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// 無法解析的 SVG 文件 (與 SkipReason 不同，這是硬性失敗)
#[derive(Error, Debug)]
pub enum SvgError {
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("Invalid UTF-8 content: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Document has no root element")]
    NoRoot,

    #[error("Root element is <{found}>, expected an SVG <svg> element")]
    NotSvgRoot { found: String },

    #[error("Malformed document: {message}")]
    Malformed { message: String },
}

pub type Result<T> = std::result::Result<T, SvgError>;

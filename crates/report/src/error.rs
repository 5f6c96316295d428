use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

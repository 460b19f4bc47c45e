/// Media type a candidate must declare to be accepted for upload.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// A user-selected file waiting to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Acceptance requires the declared media type to equal
    /// `application/pdf` exactly; anything else is rejected.
    pub fn is_pdf(&self) -> bool {
        self.media_type == PDF_MEDIA_TYPE
    }
}

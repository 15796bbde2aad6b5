//! Namespace, content-type, and relationship-type constants for the
//! presentation package.

/// XML namespaces.
pub mod ns {
    /// PresentationML main namespace (`p:`).
    pub const PRESENTATION: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

    /// DrawingML main namespace (`a:`).
    pub const DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

    /// Document relationships namespace (`r:`).
    pub const RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    /// Package relationship part namespace.
    pub const PACKAGE_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships";

    /// `[Content_Types].xml` namespace.
    pub const CONTENT_TYPES: &str =
        "http://schemas.openxmlformats.org/package/2006/content-types";

    /// Core properties namespace (`cp:`).
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";

    /// Dublin Core elements namespace (`dc:`).
    pub const DUBLIN_CORE: &str = "http://purl.org/dc/elements/1.1/";

    /// Dublin Core terms namespace (`dcterms:`).
    pub const DUBLIN_CORE_TERMS: &str = "http://purl.org/dc/terms/";

    /// XML Schema instance namespace (`xsi:`).
    pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";

    /// Extended properties namespace.
    pub const EXTENDED_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties";
}

/// Relationship `Type` attribute values.
pub mod rel_type {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const EXTENDED_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
    pub const SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
    pub const SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
    pub const SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
    pub const THEME: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
    pub const IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
}

/// Content-type strings for package parts.
pub mod content_type {
    pub const RELATIONSHIPS: &str =
        "application/vnd.openxmlformats-package.relationships+xml";
    pub const XML: &str = "application/xml";
    pub const PRESENTATION: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
    pub const SLIDE: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
    pub const SLIDE_MASTER: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
    pub const SLIDE_LAYOUT: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
    pub const THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
    pub const CORE_PROPERTIES: &str =
        "application/vnd.openxmlformats-package.core-properties+xml";
    pub const EXTENDED_PROPERTIES: &str =
        "application/vnd.openxmlformats-officedocument.extended-properties+xml";
    pub const PNG: &str = "image/png";
    pub const JPEG: &str = "image/jpeg";
}

/// Map an image file extension (as found on disk) to its content type.
pub fn image_content_type(extension: &str) -> Option<&'static str> {
    match extension {
        "png" => Some(content_type::PNG),
        "jpg" | "jpeg" => Some(content_type::JPEG),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_content_type() {
        assert_eq!(image_content_type("png"), Some("image/png"));
        assert_eq!(image_content_type("jpg"), Some("image/jpeg"));
        assert_eq!(image_content_type("jpeg"), Some("image/jpeg"));
        assert_eq!(image_content_type("gif"), None);
    }
}

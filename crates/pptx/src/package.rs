//! Package assembly and ZIP serialization.
//!
//! Collects every part of the presentation package — content types,
//! relationships, document properties, the static theme/master/layout
//! parts, the generated slides, and the image media — and writes them
//! through a single `ZipWriter` pass.

use std::fs::{self, File};
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use photodeck_core::{Deck, Error, Result, Slide};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::constants::{content_type as ct, image_content_type, ns, rel_type};
use crate::slide::{self, xml_err};
use crate::templates;

/// Relationship id of a slide's layout.
const LAYOUT_REL_ID: &str = "rId1";

/// Relationship id of an image slide's media file.
const IMAGE_REL_ID: &str = "rId2";

/// Writer that serializes a deck to a .pptx package.
pub struct PptxWriter;

impl PptxWriter {
    /// Create a new package writer.
    pub fn new() -> Self {
        Self
    }

    /// Write the deck to `path`, overwriting any existing file.
    pub fn write_file(&self, deck: &Deck, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write(deck, BufWriter::new(file))
    }

    /// Serialize the deck into any seekable sink.
    pub fn write<W: Write + Seek>(&self, deck: &Deck, sink: W) -> Result<()> {
        let mut zip = ZipWriter::new(sink);
        let options =
            FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let media = media_parts(deck);

        write_part(
            &mut zip,
            options,
            "[Content_Types].xml",
            &content_types_xml(deck, &media)?,
        )?;
        write_part(&mut zip, options, "_rels/.rels", &root_rels_xml()?)?;
        write_part(&mut zip, options, "docProps/core.xml", &core_props_xml(deck)?)?;
        write_part(&mut zip, options, "docProps/app.xml", &app_props_xml(deck)?)?;

        write_part(
            &mut zip,
            options,
            "ppt/presentation.xml",
            &presentation_xml(deck)?,
        )?;
        write_part(
            &mut zip,
            options,
            "ppt/_rels/presentation.xml.rels",
            &presentation_rels_xml(deck)?,
        )?;

        write_part(
            &mut zip,
            options,
            templates::SLIDE_MASTER_PATH,
            templates::SLIDE_MASTER_XML.as_bytes(),
        )?;
        write_part(
            &mut zip,
            options,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            templates::SLIDE_MASTER_RELS_XML.as_bytes(),
        )?;
        write_part(
            &mut zip,
            options,
            templates::TITLE_LAYOUT_PATH,
            templates::TITLE_LAYOUT_XML.as_bytes(),
        )?;
        write_part(
            &mut zip,
            options,
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            templates::LAYOUT_RELS_XML.as_bytes(),
        )?;
        write_part(
            &mut zip,
            options,
            templates::BLANK_LAYOUT_PATH,
            templates::BLANK_LAYOUT_XML.as_bytes(),
        )?;
        write_part(
            &mut zip,
            options,
            "ppt/slideLayouts/_rels/slideLayout2.xml.rels",
            templates::LAYOUT_RELS_XML.as_bytes(),
        )?;
        write_part(
            &mut zip,
            options,
            templates::THEME_PATH,
            templates::THEME_XML.as_bytes(),
        )?;

        // Generated slides, numbered in deck order. Image slides keep a
        // running media index so slideN and imageM line up with `media`.
        let mut media_index = 0usize;
        for (i, deck_slide) in deck.slides.iter().enumerate() {
            let slide_number = i + 1;
            let (slide_xml, rels_xml) = match deck_slide {
                Slide::Title { title, subtitle } => (
                    slide::title_slide_xml(title, subtitle)?,
                    slide_rels_xml(templates::TITLE_LAYOUT_PATH, None)?,
                ),
                Slide::Image {
                    image,
                    placement,
                    label,
                } => {
                    let part = &media[media_index];
                    media_index += 1;
                    (
                        slide::image_slide_xml(&image.basename, placement, label, IMAGE_REL_ID)?,
                        slide_rels_xml(templates::BLANK_LAYOUT_PATH, Some(&part.zip_path))?,
                    )
                }
            };
            write_part(
                &mut zip,
                options,
                &format!("ppt/slides/slide{}.xml", slide_number),
                &slide_xml,
            )?;
            write_part(
                &mut zip,
                options,
                &format!("ppt/slides/_rels/slide{}.xml.rels", slide_number),
                &rels_xml,
            )?;
        }

        // Media bytes are copied verbatim; one file is open at a time.
        for part in &media {
            let bytes = fs::read(&part.source)?;
            write_part(&mut zip, options, &part.zip_path, &bytes)?;
            log::debug!("embedded {} as {}", part.source.display(), part.zip_path);
        }

        let mut sink = zip.finish().map_err(zip_err)?;
        sink.flush()?;
        Ok(())
    }
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// One media file to embed: where it goes in the package and where it
/// comes from on disk.
struct MediaPart {
    zip_path: String,
    source: PathBuf,
}

/// Collect the media inventory for all image slides, in slide order.
fn media_parts(deck: &Deck) -> Vec<MediaPart> {
    let mut parts = Vec::new();
    for deck_slide in &deck.slides {
        if let Slide::Image { image, .. } = deck_slide {
            let index = parts.len() + 1;
            parts.push(MediaPart {
                zip_path: format!("ppt/media/image{}.{}", index, image.extension()),
                source: image.path.clone(),
            });
        }
    }
    parts
}

fn zip_err(e: zip::result::ZipError) -> Error {
    Error::ZipError(e.to_string())
}

/// Add one named part to the archive.
fn write_part<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    options: FileOptions,
    name: &str,
    bytes: &[u8],
) -> Result<()> {
    zip.start_file(name, options).map_err(zip_err)?;
    zip.write_all(bytes)?;
    Ok(())
}

/// `[Content_Types].xml`: extension defaults plus one override per XML part.
fn content_types_xml(deck: &Deck, media: &[MediaPart]) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    write_decl(&mut writer)?;

    let mut types = BytesStart::new("Types");
    types.push_attribute(("xmlns", ns::CONTENT_TYPES));
    writer.write_event(Event::Start(types)).map_err(xml_err)?;

    write_default(&mut writer, "rels", ct::RELATIONSHIPS)?;
    write_default(&mut writer, "xml", ct::XML)?;

    // One default per image extension actually present in the package.
    let mut extensions: Vec<&str> = media
        .iter()
        .filter_map(|p| p.zip_path.rsplit('.').next())
        .collect();
    extensions.sort_unstable();
    extensions.dedup();
    for ext in extensions {
        if let Some(content_type) = image_content_type(ext) {
            write_default(&mut writer, ext, content_type)?;
        }
    }

    write_override(&mut writer, "/ppt/presentation.xml", ct::PRESENTATION)?;
    write_override(
        &mut writer,
        &format!("/{}", templates::SLIDE_MASTER_PATH),
        ct::SLIDE_MASTER,
    )?;
    write_override(
        &mut writer,
        &format!("/{}", templates::TITLE_LAYOUT_PATH),
        ct::SLIDE_LAYOUT,
    )?;
    write_override(
        &mut writer,
        &format!("/{}", templates::BLANK_LAYOUT_PATH),
        ct::SLIDE_LAYOUT,
    )?;
    write_override(&mut writer, &format!("/{}", templates::THEME_PATH), ct::THEME)?;
    for i in 1..=deck.slide_count() {
        write_override(&mut writer, &format!("/ppt/slides/slide{}.xml", i), ct::SLIDE)?;
    }
    write_override(&mut writer, "/docProps/core.xml", ct::CORE_PROPERTIES)?;
    write_override(&mut writer, "/docProps/app.xml", ct::EXTENDED_PROPERTIES)?;

    writer
        .write_event(Event::End(BytesEnd::new("Types")))
        .map_err(xml_err)?;
    Ok(writer.into_inner())
}

/// Package-level relationships: office document and both property parts.
fn root_rels_xml() -> Result<Vec<u8>> {
    let rels = [
        Relationship::new("rId1", rel_type::OFFICE_DOCUMENT, "ppt/presentation.xml"),
        Relationship::new("rId2", rel_type::CORE_PROPERTIES, "docProps/core.xml"),
        Relationship::new("rId3", rel_type::EXTENDED_PROPERTIES, "docProps/app.xml"),
    ];
    rels_xml(&rels)
}

/// `ppt/presentation.xml`: master list, slide list, slide and notes sizes.
fn presentation_xml(deck: &Deck) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    write_decl(&mut writer)?;

    let mut root = BytesStart::new("p:presentation");
    root.push_attribute(("xmlns:a", ns::DRAWING));
    root.push_attribute(("xmlns:r", ns::RELATIONSHIPS));
    root.push_attribute(("xmlns:p", ns::PRESENTATION));
    writer.write_event(Event::Start(root)).map_err(xml_err)?;

    writer
        .write_event(Event::Start(BytesStart::new("p:sldMasterIdLst")))
        .map_err(xml_err)?;
    let mut master_id = BytesStart::new("p:sldMasterId");
    master_id.push_attribute(("id", "2147483648"));
    master_id.push_attribute(("r:id", "rId1"));
    writer.write_event(Event::Empty(master_id)).map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("p:sldMasterIdLst")))
        .map_err(xml_err)?;

    writer
        .write_event(Event::Start(BytesStart::new("p:sldIdLst")))
        .map_err(xml_err)?;
    for i in 0..deck.slide_count() {
        let id = (256 + i).to_string();
        let rid = format!("rId{}", i + 2);
        let mut slide_id = BytesStart::new("p:sldId");
        slide_id.push_attribute(("id", id.as_str()));
        slide_id.push_attribute(("r:id", rid.as_str()));
        writer.write_event(Event::Empty(slide_id)).map_err(xml_err)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("p:sldIdLst")))
        .map_err(xml_err)?;

    let cx = deck.slide_size.width.0.to_string();
    let cy = deck.slide_size.height.0.to_string();
    let mut sld_sz = BytesStart::new("p:sldSz");
    sld_sz.push_attribute(("cx", cx.as_str()));
    sld_sz.push_attribute(("cy", cy.as_str()));
    writer.write_event(Event::Empty(sld_sz)).map_err(xml_err)?;

    // Portrait notes page, the conventional companion size.
    let mut notes_sz = BytesStart::new("p:notesSz");
    notes_sz.push_attribute(("cx", cy.as_str()));
    notes_sz.push_attribute(("cy", cx.as_str()));
    writer.write_event(Event::Empty(notes_sz)).map_err(xml_err)?;

    writer
        .write_event(Event::End(BytesEnd::new("p:presentation")))
        .map_err(xml_err)?;
    Ok(writer.into_inner())
}

/// Relationships of `ppt/presentation.xml`: master first, slides in order,
/// theme last. Slide rIds start at rId2 to match the slide id list.
fn presentation_rels_xml(deck: &Deck) -> Result<Vec<u8>> {
    let mut rels = vec![Relationship::new(
        "rId1",
        rel_type::SLIDE_MASTER,
        "slideMasters/slideMaster1.xml",
    )];
    for i in 0..deck.slide_count() {
        rels.push(Relationship {
            id: format!("rId{}", i + 2),
            rel_type: rel_type::SLIDE,
            target: format!("slides/slide{}.xml", i + 1),
        });
    }
    rels.push(Relationship {
        id: format!("rId{}", deck.slide_count() + 2),
        rel_type: rel_type::THEME,
        target: "theme/theme1.xml".to_string(),
    });
    rels_xml(&rels)
}

/// Relationships of one slide: its layout, plus its media when present.
fn slide_rels_xml(layout_path: &str, media_zip_path: Option<&str>) -> Result<Vec<u8>> {
    let layout_file = layout_path.rsplit('/').next().unwrap_or(layout_path);
    let mut rels = vec![Relationship {
        id: LAYOUT_REL_ID.to_string(),
        rel_type: rel_type::SLIDE_LAYOUT,
        target: format!("../slideLayouts/{}", layout_file),
    }];
    if let Some(zip_path) = media_zip_path {
        let media_file = zip_path.rsplit('/').next().unwrap_or(zip_path);
        rels.push(Relationship {
            id: IMAGE_REL_ID.to_string(),
            rel_type: rel_type::IMAGE,
            target: format!("../media/{}", media_file),
        });
    }
    rels_xml(&rels)
}

/// `docProps/core.xml` with the deck title and UTC timestamps.
fn core_props_xml(deck: &Deck) -> Result<Vec<u8>> {
    let title = deck
        .slides
        .iter()
        .find_map(|s| match s {
            Slide::Title { title, .. } => Some(title.as_str()),
            _ => None,
        })
        .unwrap_or("");
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    let mut writer = Writer::new(Vec::new());
    write_decl(&mut writer)?;

    let mut root = BytesStart::new("cp:coreProperties");
    root.push_attribute(("xmlns:cp", ns::CORE_PROPERTIES));
    root.push_attribute(("xmlns:dc", ns::DUBLIN_CORE));
    root.push_attribute(("xmlns:dcterms", ns::DUBLIN_CORE_TERMS));
    root.push_attribute(("xmlns:xsi", ns::XSI));
    writer.write_event(Event::Start(root)).map_err(xml_err)?;

    write_text_element(&mut writer, "dc:title", title)?;
    write_text_element(&mut writer, "dc:creator", "photodeck")?;

    for element in ["dcterms:created", "dcterms:modified"] {
        let mut el = BytesStart::new(element);
        el.push_attribute(("xsi:type", "dcterms:W3CDTF"));
        writer.write_event(Event::Start(el)).map_err(xml_err)?;
        writer
            .write_event(Event::Text(BytesText::new(&now)))
            .map_err(xml_err)?;
        writer
            .write_event(Event::End(BytesEnd::new(element)))
            .map_err(xml_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("cp:coreProperties")))
        .map_err(xml_err)?;
    Ok(writer.into_inner())
}

/// `docProps/app.xml` with the application name and slide count.
fn app_props_xml(deck: &Deck) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    write_decl(&mut writer)?;

    let mut root = BytesStart::new("Properties");
    root.push_attribute(("xmlns", ns::EXTENDED_PROPERTIES));
    writer.write_event(Event::Start(root)).map_err(xml_err)?;

    write_text_element(&mut writer, "Application", "photodeck")?;
    write_text_element(&mut writer, "Slides", &deck.slide_count().to_string())?;
    write_text_element(&mut writer, "PresentationFormat", "On-screen Show (4:3)")?;

    writer
        .write_event(Event::End(BytesEnd::new("Properties")))
        .map_err(xml_err)?;
    Ok(writer.into_inner())
}

/// One entry of a relationships part.
struct Relationship {
    id: String,
    rel_type: &'static str,
    target: String,
}

impl Relationship {
    fn new(id: &str, rel_type: &'static str, target: &str) -> Self {
        Self {
            id: id.to_string(),
            rel_type,
            target: target.to_string(),
        }
    }
}

/// Serialize a relationships part.
fn rels_xml(rels: &[Relationship]) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    write_decl(&mut writer)?;

    let mut root = BytesStart::new("Relationships");
    root.push_attribute(("xmlns", ns::PACKAGE_RELATIONSHIPS));
    writer.write_event(Event::Start(root)).map_err(xml_err)?;

    for rel in rels {
        let mut el = BytesStart::new("Relationship");
        el.push_attribute(("Id", rel.id.as_str()));
        el.push_attribute(("Type", rel.rel_type));
        el.push_attribute(("Target", rel.target.as_str()));
        writer.write_event(Event::Empty(el)).map_err(xml_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("Relationships")))
        .map_err(xml_err)?;
    Ok(writer.into_inner())
}

fn write_decl(writer: &mut Writer<Vec<u8>>) -> Result<()> {
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(xml_err)
}

fn write_default(writer: &mut Writer<Vec<u8>>, extension: &str, content_type: &str) -> Result<()> {
    let mut el = BytesStart::new("Default");
    el.push_attribute(("Extension", extension));
    el.push_attribute(("ContentType", content_type));
    writer.write_event(Event::Empty(el)).map_err(xml_err)
}

fn write_override(writer: &mut Writer<Vec<u8>>, part_name: &str, content_type: &str) -> Result<()> {
    let mut el = BytesStart::new("Override");
    el.push_attribute(("PartName", part_name));
    el.push_attribute(("ContentType", content_type));
    writer.write_event(Event::Empty(el)).map_err(xml_err)
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &'static str, text: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use photodeck_core::{find_images, ImageFile};
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn write_png(path: &Path, width: u32, height: u32) {
        image::RgbImage::new(width, height).save(path).unwrap();
    }

    fn write_jpg(path: &Path, width: u32, height: u32) {
        image::RgbImage::new(width, height).save(path).unwrap();
    }

    fn written_package(deck: &Deck) -> ZipArchive<Cursor<Vec<u8>>> {
        let mut buffer = Cursor::new(Vec::new());
        PptxWriter::new().write(deck, &mut buffer).unwrap();
        buffer.set_position(0);
        ZipArchive::new(buffer).unwrap()
    }

    fn part_string(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        let mut content = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    }

    #[test]
    fn test_title_only_deck_has_one_slide() {
        let mut deck = Deck::new();
        deck.add_title_slide("Holiday", "Summer");

        let mut archive = written_package(&deck);

        assert!(archive.by_name("[Content_Types].xml").is_ok());
        assert!(archive.by_name("_rels/.rels").is_ok());
        assert!(archive.by_name("ppt/presentation.xml").is_ok());
        assert!(archive.by_name("ppt/slides/slide1.xml").is_ok());
        assert!(archive.by_name("ppt/slides/slide2.xml").is_err());

        let names: Vec<String> = archive.file_names().map(str::to_string).collect();
        assert!(!names.iter().any(|n| n.starts_with("ppt/media/")));

        let slide1 = part_string(&mut archive, "ppt/slides/slide1.xml");
        assert!(slide1.contains("<a:t>Holiday</a:t>"));
    }

    #[test]
    fn test_image_slides_and_media_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("wide.png");
        let jpg = dir.path().join("tall.jpg");
        write_png(&png, 16, 9);
        write_jpg(&jpg, 9, 16);

        let mut deck = Deck::new();
        deck.add_title_slide("Trip", "2023");
        deck.add_image_slide(ImageFile::new(&png)).unwrap();
        deck.add_image_slide(ImageFile::new(&jpg)).unwrap();

        let mut archive = written_package(&deck);

        assert!(archive.by_name("ppt/slides/slide3.xml").is_ok());
        assert!(archive.by_name("ppt/slides/slide4.xml").is_err());

        // Media bytes are copied verbatim.
        let mut embedded = Vec::new();
        archive
            .by_name("ppt/media/image1.png")
            .unwrap()
            .read_to_end(&mut embedded)
            .unwrap();
        assert_eq!(embedded, fs::read(&png).unwrap());
        assert!(archive.by_name("ppt/media/image2.jpg").is_ok());

        let content_types = part_string(&mut archive, "[Content_Types].xml");
        assert!(content_types.contains(r#"Extension="png" ContentType="image/png""#));
        assert!(content_types.contains(r#"Extension="jpg" ContentType="image/jpeg""#));

        let slide2 = part_string(&mut archive, "ppt/slides/slide2.xml");
        assert!(slide2.contains(r#"r:embed="rId2""#));
        let slide2_rels = part_string(&mut archive, "ppt/slides/_rels/slide2.xml.rels");
        assert!(slide2_rels.contains(r#"Target="../media/image1.png""#));
        assert!(slide2_rels.contains("slideLayout2.xml"));

        let title_rels = part_string(&mut archive, "ppt/slides/_rels/slide1.xml.rels");
        assert!(title_rels.contains("slideLayout1.xml"));

        let presentation = part_string(&mut archive, "ppt/presentation.xml");
        assert_eq!(presentation.matches("<p:sldId ").count(), 3);
        assert!(presentation.contains(r#"<p:sldSz cx="9144000" cy="6858000"/>"#));

        let presentation_rels =
            part_string(&mut archive, "ppt/_rels/presentation.xml.rels");
        assert_eq!(presentation_rels.matches("/slide\"").count(), 3);
        assert!(presentation_rels.contains("slideMasters/slideMaster1.xml"));
        assert!(presentation_rels.contains("theme/theme1.xml"));
    }

    #[test]
    fn test_discovered_folder_end_to_end() {
        // 3 matching files plus 2 ignored extensions: 1 + 3 slides.
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("a.png"), 16, 9);
        write_jpg(&dir.path().join("b.jpg"), 8, 8);
        write_jpg(&dir.path().join("c.jpeg"), 9, 16);
        fs::write(dir.path().join("d.gif"), b"GIF89a").unwrap();
        fs::write(dir.path().join("e.txt"), b"notes").unwrap();

        let mut deck = Deck::new();
        deck.add_title_slide("Scenario", "Four slides");
        for image in find_images(dir.path()).unwrap() {
            deck.add_image_slide(image).unwrap();
        }
        assert_eq!(deck.slide_count(), 4);

        let mut archive = written_package(&deck);
        assert!(archive.by_name("ppt/slides/slide4.xml").is_ok());
        assert!(archive.by_name("ppt/slides/slide5.xml").is_err());

        let app = part_string(&mut archive, "docProps/app.xml");
        assert!(app.contains("<Slides>4</Slides>"));
    }

    #[test]
    fn test_core_properties_carry_title() {
        let mut deck = Deck::new();
        deck.add_title_slide("Fish & Chips", "Dinner");

        let mut archive = written_package(&deck);
        let core = part_string(&mut archive, "docProps/core.xml");
        assert!(core.contains("<dc:title>Fish &amp; Chips</dc:title>"));
        assert!(core.contains("dcterms:W3CDTF"));
    }
}

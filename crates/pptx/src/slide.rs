//! Per-slide XML generation.
//!
//! Emits the `p:sld` part for each deck slide: title slides carry the two
//! layout placeholders with their text, image slides carry a `p:pic` at the
//! computed placement plus the filename label box.

use photodeck_core::geometry::{LABEL_FONT_NAME, LABEL_FONT_SIZE_INCHES};
use photodeck_core::units::POINTS_PER_INCH;
use photodeck_core::{Error, LabelBox, PlacementRect, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::constants::ns;

/// Wrap any writer-side failure into the crate error type.
pub(crate) fn xml_err<E: std::fmt::Display>(e: E) -> Error {
    Error::XmlError(e.to_string())
}

/// Label font size in hundredths of a point, the unit of `a:rPr@sz`.
fn label_font_size_centipoints() -> i64 {
    (LABEL_FONT_SIZE_INCHES * POINTS_PER_INCH * 100.0) as i64
}

/// Generate the XML part for the title slide.
pub fn title_slide_xml(title: &str, subtitle: &str) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    write_slide_prologue(&mut writer)?;

    write_placeholder(&mut writer, 2, "Title 1", "ctrTitle", None, title)?;
    write_placeholder(&mut writer, 3, "Subtitle 2", "subTitle", Some("1"), subtitle)?;

    write_slide_epilogue(&mut writer)?;
    Ok(writer.into_inner())
}

/// Generate the XML part for one image slide.
///
/// `image_rel_id` is the relationship id under which the slide's rels part
/// exposes the media file.
pub fn image_slide_xml(
    image_name: &str,
    placement: &PlacementRect,
    label: &LabelBox,
    image_rel_id: &str,
) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    write_slide_prologue(&mut writer)?;

    write_picture(&mut writer, 2, image_name, image_rel_id, placement)?;
    write_label(&mut writer, 3, label)?;

    write_slide_epilogue(&mut writer)?;
    Ok(writer.into_inner())
}

/// XML declaration, `p:sld` root, `p:cSld`, and the shape-tree header.
fn write_slide_prologue(writer: &mut Writer<Vec<u8>>) -> Result<()> {
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(xml_err)?;

    let mut sld = BytesStart::new("p:sld");
    sld.push_attribute(("xmlns:a", ns::DRAWING));
    sld.push_attribute(("xmlns:r", ns::RELATIONSHIPS));
    sld.push_attribute(("xmlns:p", ns::PRESENTATION));
    writer.write_event(Event::Start(sld)).map_err(xml_err)?;

    start(writer, "p:cSld")?;
    start(writer, "p:spTree")?;

    start(writer, "p:nvGrpSpPr")?;
    let mut cnvpr = BytesStart::new("p:cNvPr");
    cnvpr.push_attribute(("id", "1"));
    cnvpr.push_attribute(("name", ""));
    writer.write_event(Event::Empty(cnvpr)).map_err(xml_err)?;
    empty(writer, "p:cNvGrpSpPr")?;
    empty(writer, "p:nvPr")?;
    end(writer, "p:nvGrpSpPr")?;
    empty(writer, "p:grpSpPr")?;

    Ok(())
}

/// Close the shape tree and root, with the master color mapping override.
fn write_slide_epilogue(writer: &mut Writer<Vec<u8>>) -> Result<()> {
    end(writer, "p:spTree")?;
    end(writer, "p:cSld")?;
    start(writer, "p:clrMapOvr")?;
    empty(writer, "a:masterClrMapping")?;
    end(writer, "p:clrMapOvr")?;
    end(writer, "p:sld")?;
    Ok(())
}

/// A layout placeholder shape carrying text.
///
/// Geometry is inherited from the layout, so `p:spPr` stays empty.
fn write_placeholder(
    writer: &mut Writer<Vec<u8>>,
    id: u32,
    name: &str,
    ph_type: &str,
    ph_idx: Option<&str>,
    text: &str,
) -> Result<()> {
    start(writer, "p:sp")?;

    start(writer, "p:nvSpPr")?;
    write_cnvpr(writer, id, name)?;
    start(writer, "p:cNvSpPr")?;
    let mut locks = BytesStart::new("a:spLocks");
    locks.push_attribute(("noGrp", "1"));
    writer.write_event(Event::Empty(locks)).map_err(xml_err)?;
    end(writer, "p:cNvSpPr")?;
    start(writer, "p:nvPr")?;
    let mut ph = BytesStart::new("p:ph");
    ph.push_attribute(("type", ph_type));
    if let Some(idx) = ph_idx {
        ph.push_attribute(("idx", idx));
    }
    writer.write_event(Event::Empty(ph)).map_err(xml_err)?;
    end(writer, "p:nvPr")?;
    end(writer, "p:nvSpPr")?;

    empty(writer, "p:spPr")?;

    start(writer, "p:txBody")?;
    empty(writer, "a:bodyPr")?;
    empty(writer, "a:lstStyle")?;
    start(writer, "a:p")?;
    start(writer, "a:r")?;
    let mut rpr = BytesStart::new("a:rPr");
    rpr.push_attribute(("lang", "en-US"));
    rpr.push_attribute(("dirty", "0"));
    writer.write_event(Event::Empty(rpr)).map_err(xml_err)?;
    write_text(writer, text)?;
    end(writer, "a:r")?;
    end(writer, "a:p")?;
    end(writer, "p:txBody")?;

    end(writer, "p:sp")?;
    Ok(())
}

/// The picture shape, stretched into its placement rectangle.
fn write_picture(
    writer: &mut Writer<Vec<u8>>,
    id: u32,
    name: &str,
    rel_id: &str,
    rect: &PlacementRect,
) -> Result<()> {
    start(writer, "p:pic")?;

    start(writer, "p:nvPicPr")?;
    write_cnvpr(writer, id, name)?;
    start(writer, "p:cNvPicPr")?;
    let mut locks = BytesStart::new("a:picLocks");
    locks.push_attribute(("noChangeAspect", "1"));
    writer.write_event(Event::Empty(locks)).map_err(xml_err)?;
    end(writer, "p:cNvPicPr")?;
    empty(writer, "p:nvPr")?;
    end(writer, "p:nvPicPr")?;

    start(writer, "p:blipFill")?;
    let mut blip = BytesStart::new("a:blip");
    blip.push_attribute(("r:embed", rel_id));
    writer.write_event(Event::Empty(blip)).map_err(xml_err)?;
    start(writer, "a:stretch")?;
    empty(writer, "a:fillRect")?;
    end(writer, "a:stretch")?;
    end(writer, "p:blipFill")?;

    start(writer, "p:spPr")?;
    write_xfrm(writer, rect)?;
    write_rect_geom(writer)?;
    end(writer, "p:spPr")?;

    end(writer, "p:pic")?;
    Ok(())
}

/// The filename label: white-filled text box, word wrap off, autofit on.
fn write_label(writer: &mut Writer<Vec<u8>>, id: u32, label: &LabelBox) -> Result<()> {
    start(writer, "p:sp")?;

    start(writer, "p:nvSpPr")?;
    write_cnvpr(writer, id, "Label 1")?;
    let mut cnvsppr = BytesStart::new("p:cNvSpPr");
    cnvsppr.push_attribute(("txBox", "1"));
    writer.write_event(Event::Empty(cnvsppr)).map_err(xml_err)?;
    empty(writer, "p:nvPr")?;
    end(writer, "p:nvSpPr")?;

    start(writer, "p:spPr")?;
    write_xfrm(writer, &label.rect)?;
    write_rect_geom(writer)?;
    start(writer, "a:solidFill")?;
    let mut clr = BytesStart::new("a:srgbClr");
    clr.push_attribute(("val", "FFFFFF"));
    writer.write_event(Event::Empty(clr)).map_err(xml_err)?;
    end(writer, "a:solidFill")?;
    end(writer, "p:spPr")?;

    start(writer, "p:txBody")?;
    let mut bodypr = BytesStart::new("a:bodyPr");
    bodypr.push_attribute(("wrap", "none"));
    writer.write_event(Event::Start(bodypr)).map_err(xml_err)?;
    empty(writer, "a:spAutoFit")?;
    end(writer, "a:bodyPr")?;
    empty(writer, "a:lstStyle")?;
    start(writer, "a:p")?;
    start(writer, "a:r")?;
    let mut rpr = BytesStart::new("a:rPr");
    rpr.push_attribute(("lang", "en-US"));
    let sz = label_font_size_centipoints().to_string();
    rpr.push_attribute(("sz", sz.as_str()));
    rpr.push_attribute(("dirty", "0"));
    writer.write_event(Event::Start(rpr)).map_err(xml_err)?;
    let mut latin = BytesStart::new("a:latin");
    latin.push_attribute(("typeface", LABEL_FONT_NAME));
    writer.write_event(Event::Empty(latin)).map_err(xml_err)?;
    end(writer, "a:rPr")?;
    write_text(writer, &label.text)?;
    end(writer, "a:r")?;
    end(writer, "a:p")?;
    end(writer, "p:txBody")?;

    end(writer, "p:sp")?;
    Ok(())
}

/// Non-visual shape properties common to all shapes.
fn write_cnvpr(writer: &mut Writer<Vec<u8>>, id: u32, name: &str) -> Result<()> {
    let id = id.to_string();
    let mut cnvpr = BytesStart::new("p:cNvPr");
    cnvpr.push_attribute(("id", id.as_str()));
    cnvpr.push_attribute(("name", name));
    writer.write_event(Event::Empty(cnvpr)).map_err(xml_err)
}

/// `a:xfrm` with offset and extent from a placement rectangle.
fn write_xfrm(writer: &mut Writer<Vec<u8>>, rect: &PlacementRect) -> Result<()> {
    start(writer, "a:xfrm")?;

    let x = rect.left.0.to_string();
    let y = rect.top.0.to_string();
    let mut off = BytesStart::new("a:off");
    off.push_attribute(("x", x.as_str()));
    off.push_attribute(("y", y.as_str()));
    writer.write_event(Event::Empty(off)).map_err(xml_err)?;

    let cx = rect.width.0.to_string();
    let cy = rect.height.0.to_string();
    let mut ext = BytesStart::new("a:ext");
    ext.push_attribute(("cx", cx.as_str()));
    ext.push_attribute(("cy", cy.as_str()));
    writer.write_event(Event::Empty(ext)).map_err(xml_err)?;

    end(writer, "a:xfrm")
}

/// Preset rectangle geometry.
fn write_rect_geom(writer: &mut Writer<Vec<u8>>) -> Result<()> {
    let mut geom = BytesStart::new("a:prstGeom");
    geom.push_attribute(("prst", "rect"));
    writer.write_event(Event::Start(geom)).map_err(xml_err)?;
    empty(writer, "a:avLst")?;
    end(writer, "a:prstGeom")
}

/// `<a:t>` run text, escaped by the writer.
fn write_text(writer: &mut Writer<Vec<u8>>, text: &str) -> Result<()> {
    start(writer, "a:t")?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_err)?;
    end(writer, "a:t")
}

fn start(writer: &mut Writer<Vec<u8>>, name: &'static str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_err)
}

fn end(writer: &mut Writer<Vec<u8>>, name: &'static str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_err)
}

fn empty(writer: &mut Writer<Vec<u8>>, name: &'static str) -> Result<()> {
    writer
        .write_event(Event::Empty(BytesStart::new(name)))
        .map_err(xml_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use photodeck_core::geometry::{fit_image, SlideSize};

    fn as_str(bytes: &[u8]) -> &str {
        std::str::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_title_slide_carries_placeholder_text() {
        let xml = title_slide_xml("Holiday", "Summer 2023").unwrap();
        let xml = as_str(&xml);
        assert!(xml.contains(r#"<p:ph type="ctrTitle"/>"#));
        assert!(xml.contains(r#"<p:ph type="subTitle" idx="1"/>"#));
        assert!(xml.contains("<a:t>Holiday</a:t>"));
        assert!(xml.contains("<a:t>Summer 2023</a:t>"));
    }

    #[test]
    fn test_title_text_is_escaped() {
        let xml = title_slide_xml("Fish & Chips", "<markup>").unwrap();
        let xml = as_str(&xml);
        assert!(xml.contains("Fish &amp; Chips"));
        assert!(xml.contains("&lt;markup&gt;"));
        assert!(!xml.contains("<markup>"));
    }

    #[test]
    fn test_image_slide_places_picture() {
        let placement = fit_image(1600, 900, SlideSize::new());
        let label = LabelBox::for_text("beach.jpg");
        let xml = image_slide_xml("beach.jpg", &placement, &label, "rId2").unwrap();
        let xml = as_str(&xml);

        assert!(xml.contains(r#"<a:blip r:embed="rId2"/>"#));
        // 1600x900 on the 4:3 slide: full width, centered vertically.
        assert!(xml.contains(r#"<a:off x="0" y="857250"/>"#));
        assert!(xml.contains(r#"<a:ext cx="9144000" cy="5143500"/>"#));
    }

    #[test]
    fn test_label_box_styling() {
        let placement = fit_image(500, 500, SlideSize::new());
        let label = LabelBox::for_text("square.png");
        let xml = image_slide_xml("square.png", &placement, &label, "rId2").unwrap();
        let xml = as_str(&xml);

        assert!(xml.contains(r#"<a:srgbClr val="FFFFFF"/>"#));
        assert!(xml.contains(r#"<a:bodyPr wrap="none">"#));
        assert!(xml.contains("<a:spAutoFit/>"));
        assert!(xml.contains(r#"sz="1440""#));
        assert!(xml.contains(r#"<a:latin typeface="Courier New"/>"#));
        assert!(xml.contains("<a:t>square.png</a:t>"));
        // Fixed 0.5in inset.
        assert!(xml.contains(r#"<a:off x="457200" y="457200"/>"#));
    }
}

//! XML parts of a minimal PresentationML package: one master, one blank
//! layout, one theme and a picture-only slide per image.

const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const NS_PML: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;
const NS_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CT_PML: &str = "application/vnd.openxmlformats-officedocument.presentationml";

const EMPTY_GROUP: &str = r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#;

/// Relationship id of the first slide in `presentation.xml.rels`.
const FIRST_SLIDE_REL: usize = 6;

pub(super) fn content_types(slides: usize) -> String {
    let mut xml = format!(
        r#"{HEADER}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Default Extension="jpeg" ContentType="image/jpeg"/><Default Extension="jpg" ContentType="image/jpeg"/><Override PartName="/ppt/presentation.xml" ContentType="{CT_PML}.presentation.main+xml"/><Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="{CT_PML}.slideMaster+xml"/><Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="{CT_PML}.slideLayout+xml"/><Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/><Override PartName="/ppt/presProps.xml" ContentType="{CT_PML}.presProps+xml"/><Override PartName="/ppt/viewProps.xml" ContentType="{CT_PML}.viewProps+xml"/><Override PartName="/ppt/tableStyles.xml" ContentType="{CT_PML}.tableStyles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/><Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#
    );
    xml.extend((1..=slides).map(|n| {
        format!(r#"<Override PartName="/ppt/slides/slide{n}.xml" ContentType="{CT_PML}.slide+xml"/>"#)
    }));
    xml.push_str("</Types>");
    xml
}

pub(super) fn root_rels() -> String {
    format!(
        r#"{HEADER}<Relationships xmlns="{NS_RELS}"><Relationship Id="rId1" Type="{REL}/officeDocument" Target="ppt/presentation.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId3" Type="{REL}/extended-properties" Target="docProps/app.xml"/></Relationships>"#
    )
}

pub(super) fn app_props(slides: usize) -> String {
    format!(
        r#"{HEADER}<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes"><Application>{}</Application><Slides>{slides}</Slides></Properties>"#,
        env!("CARGO_PKG_NAME")
    )
}

pub(super) fn core_props() -> String {
    format!(
        r#"{HEADER}<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>Cropped images</dc:title><dc:creator>{}</dc:creator></cp:coreProperties>"#,
        env!("CARGO_PKG_NAME")
    )
}

pub(super) fn presentation(slides: usize, (cx, cy): (u64, u64)) -> String {
    let ids: String = (0..slides)
        .map(|i| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, FIRST_SLIDE_REL + i))
        .collect();
    let ids = if ids.is_empty() {
        ids
    } else {
        format!("<p:sldIdLst>{ids}</p:sldIdLst>")
    };
    format!(
        r#"{HEADER}<p:presentation {NS_PML} saveSubsetFonts="1"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>{ids}<p:sldSz cx="{cx}" cy="{cy}"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#
    )
}

pub(super) fn presentation_rels(slides: usize) -> String {
    let mut xml = format!(
        r#"{HEADER}<Relationships xmlns="{NS_RELS}"><Relationship Id="rId1" Type="{REL}/slideMaster" Target="slideMasters/slideMaster1.xml"/><Relationship Id="rId2" Type="{REL}/presProps" Target="presProps.xml"/><Relationship Id="rId3" Type="{REL}/viewProps" Target="viewProps.xml"/><Relationship Id="rId4" Type="{REL}/theme" Target="theme/theme1.xml"/><Relationship Id="rId5" Type="{REL}/tableStyles" Target="tableStyles.xml"/>"#
    );
    xml.extend((0..slides).map(|i| {
        format!(
            r#"<Relationship Id="rId{}" Type="{REL}/slide" Target="slides/slide{}.xml"/>"#,
            FIRST_SLIDE_REL + i,
            i + 1
        )
    }));
    xml.push_str("</Relationships>");
    xml
}

pub(super) fn pres_props() -> String {
    format!(r#"{HEADER}<p:presentationPr {NS_PML}/>"#)
}

pub(super) fn view_props() -> String {
    format!(r#"{HEADER}<p:viewPr {NS_PML}><p:gridSpacing cx="76200" cy="76200"/></p:viewPr>"#)
}

pub(super) fn table_styles() -> String {
    format!(
        r#"{HEADER}<a:tblStyleLst xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#
    )
}

pub(super) fn slide_master() -> String {
    format!(
        r#"{HEADER}<p:sldMaster {NS_PML}><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree>{EMPTY_GROUP}</p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst><p:txStyles><p:titleStyle/><p:bodyStyle/><p:otherStyle/></p:txStyles></p:sldMaster>"#
    )
}

pub(super) fn slide_master_rels() -> String {
    format!(
        r#"{HEADER}<Relationships xmlns="{NS_RELS}"><Relationship Id="rId1" Type="{REL}/slideLayout" Target="../slideLayouts/slideLayout1.xml"/><Relationship Id="rId2" Type="{REL}/theme" Target="../theme/theme1.xml"/></Relationships>"#
    )
}

pub(super) fn blank_layout() -> String {
    format!(
        r#"{HEADER}<p:sldLayout {NS_PML} type="blank" preserve="1"><p:cSld name="Blank"><p:spTree>{EMPTY_GROUP}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#
    )
}

pub(super) fn blank_layout_rels() -> String {
    format!(
        r#"{HEADER}<Relationships xmlns="{NS_RELS}"><Relationship Id="rId1" Type="{REL}/slideMaster" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#
    )
}

pub(super) fn theme() -> String {
    const SOLID: &str = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    const EFFECT: &str = "<a:effectStyle><a:effectLst/></a:effectStyle>";
    format!(
        r#"{HEADER}<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements><a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="44546A"/></a:dk2><a:lt2><a:srgbClr val="E7E6E6"/></a:lt2><a:accent1><a:srgbClr val="4472C4"/></a:accent1><a:accent2><a:srgbClr val="ED7D31"/></a:accent2><a:accent3><a:srgbClr val="A5A5A5"/></a:accent3><a:accent4><a:srgbClr val="FFC000"/></a:accent4><a:accent5><a:srgbClr val="5B9BD5"/></a:accent5><a:accent6><a:srgbClr val="70AD47"/></a:accent6><a:hlink><a:srgbClr val="0563C1"/></a:hlink><a:folHlink><a:srgbClr val="954F72"/></a:folHlink></a:clrScheme><a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Office"><a:fillStyleLst>{SOLID}{SOLID}{SOLID}</a:fillStyleLst><a:lnStyleLst><a:ln w="6350">{SOLID}</a:ln><a:ln w="12700">{SOLID}</a:ln><a:ln w="19050">{SOLID}</a:ln></a:lnStyleLst><a:effectStyleLst>{EFFECT}{EFFECT}{EFFECT}</a:effectStyleLst><a:bgFillStyleLst>{SOLID}{SOLID}{SOLID}</a:bgFillStyleLst></a:fmtScheme></a:themeElements></a:theme>"#
    )
}

/// A slide whose only shape is `rId2` stretched over `(0, 0)..(cx, cy)`.
pub(super) fn picture_slide(description: &str, (cx, cy): (u64, u64)) -> String {
    let description = escape(description);
    format!(
        r#"{HEADER}<p:sld {NS_PML}><p:cSld><p:spTree>{EMPTY_GROUP}<p:pic><p:nvPicPr><p:cNvPr id="2" name="Picture 1" descr="{description}"/><p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="rId2"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic></p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#
    )
}

pub(super) fn picture_slide_rels(media: &str) -> String {
    format!(
        r#"{HEADER}<Relationships xmlns="{NS_RELS}"><Relationship Id="rId1" Type="{REL}/slideLayout" Target="../slideLayouts/slideLayout1.xml"/><Relationship Id="rId2" Type="{REL}/image" Target="../media/{media}"/></Relationships>"#
    )
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

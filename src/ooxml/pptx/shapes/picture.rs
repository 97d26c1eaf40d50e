/// Picture elements (`p:pic`) and the audio/video elements built on them.
///
/// A picture whose `nvPr` carries `a:videoFile`, `a:audioFile`,
/// `a:quickTimeFile` or a `p14:media` extension is a media element; the blip then
/// only supplies its poster frame.
use crate::ooxml::drawings::effects::{Effects, parse_effects};
use crate::ooxml::drawings::fill::{PictureFill, parse_picture_fill};
use crate::ooxml::drawings::geometry::{Geometry, parse_geometry};
use crate::ooxml::drawings::line::{Line, resolve_shape_line};
use crate::ooxml::drawings::xfrm::{Transform, parse_transform};
use crate::ooxml::pptx::diagnostics::IssueCode;
use crate::ooxml::pptx::media::{MediaFormat, MediaType};
use crate::ooxml::pptx::session::PartContext;
use crate::ooxml::pptx::shapes::SlideElement;
use crate::ooxml::pptx::shapes::base::{ElementInfo, application_properties, parse_element_info};
use crate::ooxml::xml::XmlNode;
use serde::Serialize;

/// A picture.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Picture {
    pub info: ElementInfo,
    pub transform: Transform,
    /// Image reference; the path is empty when the id has no relationship
    pub image: PictureFill,
    pub geometry: Option<Geometry>,
    pub line: Option<Line>,
    pub effects: Option<Effects>,
}

/// An audio or video element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub info: ElementInfo,
    pub transform: Transform,
    pub media_type: MediaType,
    pub r_id: String,
    /// Package path of embedded media, or the URL of linked media; empty when
    /// unresolved
    pub path: String,
    pub is_external: bool,
    pub format: MediaFormat,
    /// Poster frame image
    pub poster: PictureFill,
}

impl Picture {
    pub fn is_resolved(&self) -> bool {
        self.image.is_resolved()
    }
}

/// The media reference of a picture, if any: relationship id and kind.
fn media_reference(nv_pr: &XmlNode) -> Option<(String, Option<MediaType>)> {
    // p14:media holds the embedded copy; the legacy element often links the same file
    if let Some(media) = nv_pr.find("p14:media")
        && let Some(id) = media.attr("r:embed").filter(|id| !id.is_empty())
    {
        let kind = nv_pr
            .child("videoFile")
            .or_else(|| nv_pr.child("quickTimeFile"))
            .map(|_| MediaType::Video)
            .or_else(|| nv_pr.child("audioFile").map(|_| MediaType::Audio));
        return Some((id.to_string(), kind));
    }

    [
        ("videoFile", MediaType::Video),
        ("quickTimeFile", MediaType::Video),
        ("audioFile", MediaType::Audio),
        ("wavAudioFile", MediaType::Audio),
    ]
    .into_iter()
    .find_map(|(name, kind)| {
        let el = nv_pr.child(name)?;
        let id = el.attr("r:link").or_else(|| el.attr("r:embed"))?;
        Some((id.to_string(), Some(kind)))
    })
}

pub(crate) fn parse_picture(node: &XmlNode, ctx: &mut PartContext<'_>) -> SlideElement {
    let sp_pr = node.child("spPr");
    let info = parse_element_info(node, ctx);
    let transform = parse_transform(sp_pr.and_then(|pr| pr.child("xfrm")));
    let image = node
        .child("blipFill")
        .map(|b| parse_picture_fill(b, ctx.rels))
        .unwrap_or_else(|| PictureFill {
            embed: String::new(),
            path: String::new(),
            stretch: false,
            crop: None,
            tile: None,
            rot_with_shape: true,
        });

    if let Some((r_id, kind)) = application_properties(node).and_then(media_reference) {
        let rels = ctx.rels;
        let rel = rels.get(&r_id);
        if rel.is_none() {
            ctx.warn(
                IssueCode::UnresolvedMedia,
                format!("media {} has no target", r_id),
                Some(&info.name),
            );
        }
        let path = rel.map(|r| r.target().to_string()).unwrap_or_default();
        let is_external = rel.is_some_and(|r| r.is_external());
        let format = MediaFormat::detect(&path, None);
        log::debug!("media element {} -> {:?} {}", info.id, format, path);

        return SlideElement::Media(Media {
            media_type: kind.unwrap_or_else(|| format.media_type()),
            info,
            transform,
            r_id,
            path,
            is_external,
            format,
            poster: image,
        });
    }

    if !image.embed.is_empty() && !image.is_resolved() {
        ctx.warn(
            IssueCode::UnresolvedImage,
            format!("picture image {} has no target", image.embed),
            Some(&info.name),
        );
    }

    SlideElement::Picture(Picture {
        info,
        transform,
        image,
        geometry: parse_geometry(sp_pr),
        line: resolve_shape_line(sp_pr, ctx.rels),
        effects: parse_effects(sp_pr),
    })
}

//! Static pages: image gallery and acknowledgements, plus image lookup.

use std::path::{Path, PathBuf};

use iceage_catalog::checked_name;
use iceage_core::{Error, Result};
use iceage_render::html::{self, Level, NavItem};

use crate::state::AppState;

/// URL prefix images are served under.
pub const IMAGE_ROUTE: &str = "/images";

fn image_url(file: &str) -> String {
    format!("{IMAGE_ROUTE}/{}", html::encode_component(file))
}

fn figure(file: &str, caption: Option<&str>) -> String {
    let caption = caption
        .map(|c| format!("<figcaption>{}</figcaption>", html::escape(c)))
        .unwrap_or_default();
    format!(
        "<figure><img src=\"{}\" alt=\"{}\" loading=\"lazy\">{caption}</figure>",
        image_url(file),
        html::escape(file)
    )
}

/// Render the image gallery.
pub fn gallery(state: &AppState) -> String {
    let mut body = String::from("<div class=\"gallery\">");
    for image in state.config.gallery_images() {
        body.push_str(&figure(&image.file, Some(&image.caption)));
    }
    body.push_str("</div>");
    html::page("Image gallery", NavItem::Gallery, &body)
}

/// Render the acknowledgements page.
pub fn acknowledgements() -> String {
    let mut body = String::from("<h1>🥳 Acknowledgements:</h1>");
    body.push_str(&html::alert(
        Level::Info,
        "Project funding via NSF Arctic Natural Sciences awards #2052561, #2052549, #205255",
    ));
    body.push_str(
        "<ul>\
         <li><strong>Authors:</strong> Twila A. Moon, Dustin Carroll, Ellyn Enderlin, Aman KC, Alexandra Friel</li>\
         <li><strong>Institutions:</strong> Boise State University, University of Colorado Boulder, San Jose State \
         University, National Snow and Ice Data Center, Cooperative Institute for Research in Environmental Sciences, \
         &amp; Jet Propulsion Laboratory California Institute of Technology</li>\
         <li><strong>Data Generation:</strong> Alexandra Friel, Isabella Welk, Alex Iturriria, Madelyn Woods</li>\
         <li><strong>Data Visualization &amp; Application Development:</strong> Alexandra Friel</li>\
         </ul>",
    );
    body.push_str(
        "<h1>🔮 The Future of ICE-AGE:</h1>\
         <p>ICE-AGE is designed as a database that can grow and evolve. The full code and workflow for ICE-AGE will \
         be publicly accessible. ICE-AGE is meant as a community resource to reduce the idea-to-research timeline \
         for iceberg-focused research. Within our team, ICE-AGE will inform ongoing work focused on improved \
         freshwater flux estimates for Greenland and improved representation of iceberg-derived freshwater flux in \
         models using DEM-differenced melt rates and an iceberg melt model.</p>",
    );
    body.push_str(
        "<h3>If you liked this ICE-AGE application, you may also be interested in: </h3>\
         <ul><li><a href=\"https://joshdata.me/iceberger.html\">ICEBERGER: Interactive Tool for Iceberg Research</a></li>\
         <li><a href=\"https://zenodo.org/records/8007035\">Zenodo Record - ICE-AGE Data</a></li></ul>",
    );

    body.push_str("<div class=\"sidebar-art grid3\">");
    body.push_str(&figure("NSIDC.png", None));
    body.push_str(&figure("NSF.png", None));
    body.push_str(&figure("Institutions.png", None));
    body.push_str(&figure(
        "Scenic-glacier.png",
        Some(
            "Tundra ponds form along the coast near Ilulissat, Greenland, while icebergs are visible along the \
             horizon. Credit: Twila Moon, NSIDC",
        ),
    ));
    body.push_str(&figure("Chilly-iceberg.png", Some("Credit: Twila Moon, NSIDC")));
    body.push_str("</div>");
    html::page("Acknowledgements", NavItem::Acknowledgements, &body)
}

/// Path of an image in the catalog's image directory.
///
/// Only a bare file name is accepted; anything with a directory part is
/// [`Error::MissingFile`], as is a name that does not exist.
pub fn resolve_image(state: &AppState, file: &str) -> Result<PathBuf> {
    if checked_name(file).is_err() {
        return Err(Error::missing_file(file));
    }
    let path = state.config.catalog.image_dir().join(file);
    if path.is_file() {
        Ok(path)
    } else {
        Err(Error::missing_file(&path))
    }
}

/// Content type for an image file name.
pub fn image_content_type(file: &str) -> &'static str {
    let ext = Path::new(file)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

//! Category-aware display model for results and transcript lines.
//!
//! Every optional field maps to its own sub-element, so a missing field only
//! drops that element and never the whole item.

use std::fmt::{self, Display};

use crate::{
    controller::ResultSet,
    models::{CatalogItem, MusicItem, ResultItem, Speaker, TranscriptEntry},
};

/// Separator between inline details
const INLINE_SEPARATOR: &str = " | ";
const TAG_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Heading {
    Text(String),
    Link { text: String, href: String },
}

/// Labelled value shown next to or under the heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    pub heading: Heading,
    /// Short fields shown on the heading line
    pub inline: Vec<Detail>,
    /// Longer fields shown on their own lines
    pub blocks: Vec<Detail>,
    pub image: Option<String>,
}

fn push_detail(details: &mut Vec<Detail>, label: &'static str, value: Option<&String>) {
    if let Some(value) = value {
        details.push(Detail {
            label,
            value: value.clone(),
        });
    }
}

fn render_music(item: &MusicItem) -> RenderedItem {
    let mut inline = Vec::new();
    push_detail(&mut inline, "Artista", item.artist.as_ref());
    push_detail(&mut inline, "Año", item.year.as_ref());
    push_detail(&mut inline, "Streams", item.streams.as_ref());

    RenderedItem {
        heading: Heading::Text(item.name.clone().unwrap_or_default()),
        inline,
        blocks: Vec::new(),
        image: item.cover().map(str::to_string),
    }
}

fn render_catalog(item: &CatalogItem) -> RenderedItem {
    let text = item.name.clone().unwrap_or_default();
    let heading = match &item.link {
        Some(href) => Heading::Link {
            text,
            href: href.clone(),
        },
        None => Heading::Text(text),
    };

    let mut inline = Vec::new();
    push_detail(&mut inline, "Autor", item.author.as_ref());
    push_detail(&mut inline, "Director", item.director.as_ref());
    push_detail(&mut inline, "Artista", item.artist.as_ref());
    push_detail(&mut inline, "Plataforma", item.platform.as_ref());
    push_detail(&mut inline, "Calificación", item.rating.as_ref());

    let mut blocks = Vec::new();
    push_detail(&mut blocks, "Reseña", item.review.as_ref());
    push_detail(&mut blocks, "Sinopsis", item.synopsis.as_ref());
    if !item.tags.is_empty() {
        blocks.push(Detail {
            label: "Tags",
            value: item.tags.join(TAG_SEPARATOR),
        });
    }

    RenderedItem {
        heading,
        inline,
        blocks,
        image: None,
    }
}

pub fn render_item(item: &ResultItem) -> RenderedItem {
    match item {
        ResultItem::Music(music) => render_music(music),
        ResultItem::Catalog(catalog) => render_catalog(catalog),
    }
}

pub fn render_results(results: &ResultSet) -> Vec<RenderedItem> {
    results.items.iter().map(render_item).collect()
}

impl Display for RenderedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.heading {
            Heading::Text(text) => write!(f, "{}", text)?,
            Heading::Link { text, href } => write!(f, "{} <{}>", text, href)?,
        }
        for detail in &self.inline {
            write!(f, "{}{}: {}", INLINE_SEPARATOR, detail.label, detail.value)?;
        }
        for detail in &self.blocks {
            write!(f, "\n    {}: {}", detail.label, detail.value)?;
        }
        if let Some(url) = &self.image {
            write!(f, "\n    [cover] {}", url)?;
        }
        Ok(())
    }
}

/// Transcript line as shown in the panel
pub fn render_entry(entry: &TranscriptEntry) -> String {
    let who = match entry.speaker {
        Speaker::User => "Tú",
        Speaker::System => "NEA",
    };
    format!("{}: {}", who, entry.text)
}

//! [`PdfBackend`] on top of `lopdf`.
//!
//! On load the page tree is flattened: every page gets its inherited
//! `MediaBox`, `CropBox`, `Resources` and `Rotate` copied onto itself and
//! becomes a direct kid of the root `Pages` node. Structural edits then
//! reduce to editing one ordered list of page ids.
//!
//! Drawing is buffered per page and written on [`save`](PdfBackend::save) as a
//! single appended content stream. Existing page content is wrapped in
//! `q`/`Q` first so that its graphics state cannot leak into the overlay.

use std::collections::{HashMap, HashSet};

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use super::{LineStyle, PdfBackend, RectStyle, TextRun};
use crate::error::{Error, Result};
use crate::export::{EmbeddedImage, ImageFormat};
use crate::fonts::StandardFont;
use crate::geometry::{PageSize, Point, Rect};
use crate::writer::{ContentStreamBuilder, ContentStreamOp};

/// Page attributes a page may inherit from its ancestors.
const INHERITABLE: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// Prefix for resource names added by this backend.
const RESOURCE_PREFIX: &str = "Pc";

/// Guard against cyclic `Parent` chains.
const MAX_TREE_DEPTH: usize = 64;

enum ResourceName<'a> {
    /// Always this name; an existing entry is replaced
    Fixed(&'a str),
    /// First free name of the form `{prefix}{n}`
    Unique(&'a str),
}

/// `lopdf`-backed document.
pub struct LopdfBackend {
    doc: Document,
    pages_root: ObjectId,
    page_ids: Vec<ObjectId>,
    pending: HashMap<ObjectId, ContentStreamBuilder>,
    fonts: HashMap<StandardFont, ObjectId>,
    compress: bool,
}

impl LopdfBackend {
    /// An empty document with no pages.
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_root = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        });
        let catalog = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_root,
        });
        doc.trailer.set("Root", catalog);

        Self {
            doc,
            pages_root,
            page_ids: Vec::new(),
            pending: HashMap::new(),
            fonts: HashMap::new(),
            compress: true,
        }
    }

    /// A document with `count` blank pages of `size`.
    pub fn blank(size: PageSize, count: usize) -> Result<Self> {
        let mut backend = Self::new();
        for _ in 0..count {
            backend.add_page(size)?;
        }
        Ok(backend)
    }

    /// Enable or disable stream compression on save.
    pub fn with_compression(mut self, enable: bool) -> Self {
        self.compress = enable;
        self
    }

    /// The underlying document. Pending drawing is not yet part of it.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    fn page_id(&self, index: usize) -> Result<ObjectId> {
        self.page_ids.get(index).copied().ok_or(Error::PageOutOfRange {
            page: index,
            count: self.page_ids.len(),
        })
    }

    /// Write `page_ids` back into the root `Pages` node.
    fn sync_page_tree(&mut self) -> Result<()> {
        let kids: Vec<Object> = self.page_ids.iter().map(|&id| Object::Reference(id)).collect();
        let root = self.doc.get_object_mut(self.pages_root)?.as_dict_mut()?;
        root.set("Kids", kids);
        root.set("Count", self.page_ids.len() as i64);
        Ok(())
    }

    fn new_page(&mut self, size: PageSize) -> ObjectId {
        self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_root,
            "MediaBox" => vec![0.into(), 0.into(), Object::Real(size.width), Object::Real(size.height)],
            "Resources" => Dictionary::new(),
        })
    }

    fn font_object(&mut self, font: StandardFont) -> ObjectId {
        if let Some(&id) = self.fonts.get(&font) {
            return id;
        }
        let id = self.doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        self.fonts.insert(font, id);
        id
    }

    fn image_object(&mut self, image: &EmbeddedImage) -> ObjectId {
        let soft_mask = image.soft_mask.as_ref().map(|mask| {
            let dict = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width as i64,
                "Height" => image.height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
            };
            self.doc.add_object(precompressed(dict, mask.clone()))
        });

        let filter = match image.format {
            ImageFormat::Jpeg => "DCTDecode",
            ImageFormat::Png => "FlateDecode",
        };
        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => image.width as i64,
            "Height" => image.height as i64,
            "ColorSpace" => image.color_space.pdf_name(),
            "BitsPerComponent" => image.bits_per_component as i64,
            "Filter" => filter,
        };
        if let Some(mask_id) = soft_mask {
            dict.set("SMask", mask_id);
        }
        self.doc.add_object(precompressed(dict, image.data.clone()))
    }

    /// Register `target` in the page's `category` resource dictionary.
    ///
    /// Shared or indirect resource dictionaries are copied onto the page
    /// before being modified.
    fn add_resource(
        &mut self,
        page_id: ObjectId,
        category: &str,
        name: ResourceName<'_>,
        target: ObjectId,
    ) -> Result<String> {
        let current = self
            .doc
            .get_object(page_id)?
            .as_dict()?
            .get(b"Resources")
            .ok()
            .cloned();
        let mut resources = match current {
            Some(Object::Reference(id)) => self.resolve_dict(id),
            Some(Object::Dictionary(dict)) => dict,
            _ => Dictionary::new(),
        };
        let mut entries = match resources.get(category.as_bytes()).ok().cloned() {
            Some(Object::Reference(id)) => self.resolve_dict(id),
            Some(Object::Dictionary(dict)) => dict,
            _ => Dictionary::new(),
        };

        let key = match name {
            ResourceName::Fixed(key) => key.to_string(),
            ResourceName::Unique(prefix) => (1..)
                .map(|n| format!("{}{}", prefix, n))
                .find(|candidate| !entries.has(candidate.as_bytes()))
                .unwrap_or_else(|| prefix.to_string()),
        };
        entries.set(key.as_str(), target);
        resources.set(category, entries);

        self.doc
            .get_object_mut(page_id)?
            .as_dict_mut()?
            .set("Resources", resources);
        Ok(key)
    }

    fn resolve_dict(&self, id: ObjectId) -> Dictionary {
        self.doc
            .get_object(id)
            .and_then(Object::as_dict)
            .cloned()
            .unwrap_or_default()
    }

    /// Drop unreachable objects, and cached fonts that went with them.
    fn prune(&mut self) {
        self.doc.prune_objects();
        let objects = &self.doc.objects;
        self.fonts.retain(|_, id| objects.contains_key(id));
    }

    fn builder(&mut self, page_id: ObjectId) -> &mut ContentStreamBuilder {
        self.pending.entry(page_id).or_default()
    }

    /// Append buffered drawing to each page's content.
    fn flush_pending(&mut self) -> Result<()> {
        let pending: Vec<(ObjectId, ContentStreamBuilder)> = self.pending.drain().collect();
        for (page_id, mut builder) in pending {
            builder.end_text();
            if builder.is_empty() {
                continue;
            }
            let (llx, lly) = media_box(&self.doc, page_id)
                .map(|(llx, lly, _, _)| (llx, lly))
                .unwrap_or((0.0, 0.0));

            let mut overlay = ContentStreamBuilder::new();
            overlay.save_state();
            if llx != 0.0 || lly != 0.0 {
                overlay.op(ContentStreamOp::Transform(1.0, 0.0, 0.0, 1.0, llx, lly));
            }
            let mut bytes = overlay.build()?;
            bytes.extend(builder.build()?);
            bytes.extend_from_slice(b"Q\n");
            self.append_content(page_id, bytes)?;
        }
        Ok(())
    }

    fn append_content(&mut self, page_id: ObjectId, bytes: Vec<u8>) -> Result<()> {
        let existing = match self.doc.get_object(page_id)?.as_dict()?.get(b"Contents") {
            Ok(Object::Reference(id)) => match self.doc.get_object(*id) {
                Ok(Object::Array(items)) => items.clone(),
                _ => vec![Object::Reference(*id)],
            },
            Ok(Object::Array(items)) => items.clone(),
            _ => Vec::new(),
        };

        let overlay_id = self.doc.add_object(Stream::new(Dictionary::new(), bytes));
        let contents = if existing.is_empty() {
            vec![Object::Reference(overlay_id)]
        } else {
            let open = self.doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
            let close = self.doc.add_object(Stream::new(Dictionary::new(), b"\nQ\n".to_vec()));
            let mut contents = Vec::with_capacity(existing.len() + 3);
            contents.push(Object::Reference(open));
            contents.extend(existing);
            contents.push(Object::Reference(close));
            contents.push(Object::Reference(overlay_id));
            contents
        };
        self.doc
            .get_object_mut(page_id)?
            .as_dict_mut()?
            .set("Contents", contents);
        Ok(())
    }
}

impl Default for LopdfBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfBackend for LopdfBackend {
    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn page_size(&self, index: usize) -> Result<PageSize> {
        let page_id = self.page_id(index)?;
        Ok(media_box(&self.doc, page_id)
            .map(|(llx, lly, urx, ury)| PageSize::new((urx - llx).abs(), (ury - lly).abs()))
            .unwrap_or(PageSize::LETTER))
    }

    fn add_page(&mut self, size: PageSize) -> Result<()> {
        let index = self.page_ids.len();
        self.insert_page(index, size)
    }

    fn insert_page(&mut self, index: usize, size: PageSize) -> Result<()> {
        if index > self.page_ids.len() {
            return Err(Error::PageOutOfRange {
                page: index,
                count: self.page_ids.len(),
            });
        }
        let page_id = self.new_page(size);
        self.page_ids.insert(index, page_id);
        self.sync_page_tree()
    }

    fn remove_page(&mut self, index: usize) -> Result<()> {
        let page_id = self.page_id(index)?;
        self.page_ids.remove(index);
        self.pending.remove(&page_id);
        self.sync_page_tree()?;
        self.prune();
        Ok(())
    }

    fn move_page(&mut self, from: usize, to: usize) -> Result<()> {
        let page_id = self.page_id(from)?;
        if to >= self.page_ids.len() {
            return Err(Error::PageOutOfRange {
                page: to,
                count: self.page_ids.len(),
            });
        }
        self.page_ids.remove(from);
        self.page_ids.insert(to, page_id);
        self.sync_page_tree()
    }

    fn copy_pages_from(&mut self, source: &[u8], indices: Option<&[usize]>, at: usize) -> Result<usize> {
        if at > self.page_ids.len() {
            return Err(Error::PageOutOfRange {
                page: at,
                count: self.page_ids.len(),
            });
        }
        let mut src = open_document(source)?;
        src.renumber_objects_with(self.doc.max_id + 1);
        let (_, src_pages) = flatten_page_tree(&mut src)?;

        let selected: Vec<ObjectId> = match indices {
            Some(indices) => indices
                .iter()
                .map(|&i| {
                    src_pages.get(i).copied().ok_or(Error::PageOutOfRange {
                        page: i,
                        count: src_pages.len(),
                    })
                })
                .collect::<Result<_>>()?,
            None => src_pages,
        };

        let src_max = src.objects.keys().map(|&(id, _)| id).max().unwrap_or(0);
        self.doc.objects.extend(src.objects);
        self.doc.max_id = self.doc.max_id.max(src_max);

        let mut used = HashSet::new();
        let mut inserted = Vec::with_capacity(selected.len());
        for page_id in selected {
            // A page selected twice needs its own page object.
            let page_id = if used.insert(page_id) {
                page_id
            } else {
                let copy = self.doc.get_object(page_id)?.as_dict()?.clone();
                self.doc.add_object(copy)
            };
            self.doc
                .get_object_mut(page_id)?
                .as_dict_mut()?
                .set("Parent", self.pages_root);
            inserted.push(page_id);
        }

        let count = inserted.len();
        self.page_ids.splice(at..at, inserted);
        self.sync_page_tree()?;
        self.prune();
        log::debug!("Copied {} pages into position {}", count, at);
        Ok(count)
    }

    fn draw_text(&mut self, page: usize, run: &TextRun) -> Result<()> {
        let page_id = self.page_id(page)?;
        let font_id = self.font_object(run.font);
        let name = format!("{}{}", RESOURCE_PREFIX, run.font.resource_name());
        self.add_resource(page_id, "Font", ResourceName::Fixed(&name), font_id)?;
        self.builder(page_id)
            .fill_color(run.color)
            .set_font(&name, run.size)
            .text(&run.text, run.x, run.y);
        Ok(())
    }

    fn draw_image(&mut self, page: usize, image: &EmbeddedImage, rect: Rect) -> Result<()> {
        let page_id = self.page_id(page)?;
        let image_id = self.image_object(image);
        let prefix = format!("{}Im", RESOURCE_PREFIX);
        let name = self.add_resource(page_id, "XObject", ResourceName::Unique(&prefix), image_id)?;
        self.builder(page_id)
            .draw_image(&name, rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn draw_line(&mut self, page: usize, from: Point, to: Point, style: &LineStyle) -> Result<()> {
        let page_id = self.page_id(page)?;
        self.builder(page_id)
            .end_text()
            .stroke_color(style.color)
            .set_line_width(style.width)
            .move_to(from.x, from.y)
            .line_to(to.x, to.y)
            .stroke();
        Ok(())
    }

    fn draw_rectangle(&mut self, page: usize, rect: Rect, style: &RectStyle) -> Result<()> {
        let page_id = self.page_id(page)?;
        let builder = self.builder(page_id);
        builder.end_text();
        if let Some(fill) = style.fill {
            builder.fill_color(fill);
        }
        if let Some(stroke) = style.stroke {
            builder.stroke_color(stroke).set_line_width(style.line_width);
        }
        match (style.fill.is_some(), style.stroke.is_some()) {
            (true, true) => {
                builder.rect(rect.x, rect.y, rect.width, rect.height).fill_stroke();
            },
            (true, false) => {
                builder.rect(rect.x, rect.y, rect.width, rect.height).fill();
            },
            (false, true) => {
                builder.rect(rect.x, rect.y, rect.width, rect.height).stroke();
            },
            (false, false) => {},
        }
        Ok(())
    }

    fn save(&mut self) -> Result<Vec<u8>> {
        self.flush_pending()?;
        if self.compress {
            self.doc.compress();
        }
        let mut buffer = Vec::new();
        self.doc.save_to(&mut buffer)?;
        Ok(buffer)
    }

    fn load(bytes: &[u8]) -> Result<Self> {
        let mut doc = open_document(bytes)?;
        let (pages_root, page_ids) = flatten_page_tree(&mut doc)?;
        log::debug!("Loaded PDF with {} pages", page_ids.len());
        Ok(Self {
            doc,
            pages_root,
            page_ids,
            pending: HashMap::new(),
            fonts: HashMap::new(),
            compress: true,
        })
    }
}

/// Parse `bytes`, rejecting encrypted documents.
fn open_document(bytes: &[u8]) -> Result<Document> {
    if !bytes.starts_with(b"%PDF-") {
        let found = String::from_utf8_lossy(&bytes[..bytes.len().min(5)]).into_owned();
        return Err(Error::InvalidHeader(found));
    }
    let doc = Document::load_mem(bytes)?;
    if doc.is_encrypted() {
        return Err(Error::Unsupported("encrypted PDF".to_string()));
    }
    Ok(doc)
}

/// A stream whose content is already encoded.
fn precompressed(dict: Dictionary, content: Vec<u8>) -> Stream {
    let mut stream = Stream::new(dict, content);
    stream.allows_compression = false;
    stream
}

fn pages_root_id(doc: &Document) -> Result<ObjectId> {
    Ok(doc.catalog()?.get(b"Pages")?.as_reference()?)
}

/// Make every page a direct kid of the root `Pages` node, copying inherited
/// attributes down. Returns the root id and the pages in document order.
fn flatten_page_tree(doc: &mut Document) -> Result<(ObjectId, Vec<ObjectId>)> {
    let root = pages_root_id(doc)?;
    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();

    for &page_id in &page_ids {
        let missing: Vec<(&[u8], Object)> = {
            let page = doc.get_object(page_id)?.as_dict()?;
            INHERITABLE
                .iter()
                .filter(|key| !page.has(key))
                .filter_map(|&key| inherited_attribute(doc, page, key).map(|value| (key, value)))
                .collect()
        };

        let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
        for (key, value) in missing {
            page.set(key.to_vec(), value);
        }
        if !page.has(b"MediaBox") {
            let letter = PageSize::LETTER;
            page.set(
                "MediaBox",
                vec![0.into(), 0.into(), Object::Real(letter.width), Object::Real(letter.height)],
            );
        }
        page.set("Parent", root);
    }

    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
    let root_dict = doc.get_object_mut(root)?.as_dict_mut()?;
    root_dict.set("Kids", kids);
    root_dict.set("Count", page_ids.len() as i64);
    Ok((root, page_ids))
}

fn inherited_attribute(doc: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    for _ in 0..MAX_TREE_DEPTH {
        let node = doc.get_object(parent?).and_then(Object::as_dict).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }
    None
}

/// `(llx, lly, urx, ury)` of a page's media box.
fn media_box(doc: &Document, page_id: ObjectId) -> Option<(f32, f32, f32, f32)> {
    let raw = doc.get_object(page_id).and_then(Object::as_dict).ok()?.get(b"MediaBox").ok()?;
    let resolved = match raw {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let values: Vec<f32> = resolved.as_array().ok()?.iter().filter_map(number).collect();
    match values[..] {
        [llx, lly, urx, ury] => Some((llx.min(urx), lly.min(ury), llx.max(urx), lly.max(ury))),
        _ => None,
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(f) => Some(*f),
        _ => None,
    }
}

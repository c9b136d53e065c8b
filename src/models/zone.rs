//! Facsimile zones
//!
//! A zone is a pixel bounding box under the document's `surface`. Content
//! elements point at their zone through `facs`. Zones are never shared: each
//! one is created for a single element and removed with it.

use serde::{Deserialize, Serialize};

use super::node::{NodeId, NodeName};
use super::tree::MeiDocument;
use crate::errors::{EditError, EditResult};

/// Bounding box in image pixel coordinates
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub ulx: i32,
    pub uly: i32,
    pub lrx: i32,
    pub lry: i32,
}

impl BoundingBox {
    pub fn new(ulx: i32, uly: i32, lrx: i32, lry: i32) -> Self {
        Self { ulx, uly, lrx, lry }
    }
}

/// `facs` values may be written as a bare id or as a `#id` reference
fn facs_target(facs: &str) -> &str {
    facs.strip_prefix('#').unwrap_or(facs)
}

impl MeiDocument {
    /// The surface zones are attached to
    pub fn surface(&self) -> EditResult<NodeId> {
        self.first_by_name(&NodeName::Surface)
            .ok_or_else(|| EditError::malformed("document has no <surface> for zones"))
    }

    /// Create a detached zone carrying the given box
    pub fn create_zone(&mut self, bbox: BoundingBox) -> NodeId {
        let zone = self.create(NodeName::Zone);
        self.write_bbox(zone, bbox);
        zone
    }

    fn write_bbox(&mut self, zone: NodeId, bbox: BoundingBox) {
        self.set_attribute(zone, "ulx", bbox.ulx.to_string());
        self.set_attribute(zone, "uly", bbox.uly.to_string());
        self.set_attribute(zone, "lrx", bbox.lrx.to_string());
        self.set_attribute(zone, "lry", bbox.lry.to_string());
    }

    /// Read a zone's box; `None` if any coordinate is missing or not a number
    pub fn zone_bbox(&self, zone: NodeId) -> Option<BoundingBox> {
        let coord = |key: &str| self.attribute(zone, key).and_then(|v| v.trim().parse::<i32>().ok());
        Some(BoundingBox {
            ulx: coord("ulx")?,
            uly: coord("uly")?,
            lrx: coord("lrx")?,
            lry: coord("lry")?,
        })
    }

    /// Put `zone` under the surface and point `content` at it
    pub fn attach_zone(&mut self, content: NodeId, zone: NodeId) -> EditResult<()> {
        let surface = self.surface()?;
        self.append(surface, zone)?;
        let zone_id = self.id_of(zone).to_string();
        self.set_attribute(content, "facs", zone_id);
        Ok(())
    }

    /// Create a zone for `content` and attach it
    pub fn add_zone(&mut self, content: NodeId, bbox: BoundingBox) -> EditResult<NodeId> {
        let zone = self.create_zone(bbox);
        if let Err(err) = self.attach_zone(content, zone) {
            self.remove(zone);
            return Err(err);
        }
        Ok(zone)
    }

    /// The zone `content` refers to, if its `facs` resolves to one
    pub fn zone_of(&self, content: NodeId) -> Option<NodeId> {
        let facs = self.attribute(content, "facs")?;
        let zone = self.find_by_id(facs_target(facs))?;
        if self.node(zone).is(&NodeName::Zone) {
            Some(zone)
        } else {
            None
        }
    }

    /// Update the referenced zone in place, or create and attach a new one
    pub fn update_or_create_zone(&mut self, content: NodeId, bbox: BoundingBox) -> EditResult<NodeId> {
        match self.zone_of(content) {
            Some(zone) => {
                self.write_bbox(zone, bbox);
                Ok(zone)
            }
            None => {
                if let Some(stale) = self.attribute(content, "facs") {
                    log::warn!(
                        "facs '{}' on '{}' does not resolve to a zone; replacing it",
                        stale,
                        self.id_of(content)
                    );
                }
                self.add_zone(content, bbox)
            }
        }
    }

    /// Remove the zone `content` refers to; no-op when there is none
    pub fn detach_zone(&mut self, content: NodeId) {
        if let Some(zone) = self.zone_of(content) {
            self.remove(zone);
        }
        self.remove_attribute(content, "facs");
    }

    /// Remove a content element together with its zone
    pub fn remove_with_zone(&mut self, content: NodeId) {
        self.detach_zone(content);
        self.remove(content);
    }
}

//! Moving the viewer from one state to another.
//!
//! A transition is split around the only suspension point, the image load:
//! [`Navigator::begin`] validates the target, tears down the old markers and
//! hands out an [`ImageTicket`]; once the engine has loaded the image the
//! caller passes the ticket back to [`Navigator::finish`], which applies the
//! image, the title and the new markers. Tickets from superseded
//! transitions are discarded so a slow load cannot resurrect an old state.

use crate::constants::{MARKER_DISTANCE, MARKER_SIZE};
use crate::error::PanoResult;
use crate::geometry::marker_offset;
use crate::tour::{Rotation, State, Tour};
use glam::Vec3;
use smallvec::SmallVec;
use std::rc::Rc;

/// What happens when a marker is clicked.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkerTarget {
    /// Go straight to this state.
    State(String),
    /// Let the user pick one of several states.
    Group { title: String, state_ids: Vec<String> },
}

/// Everything the engine needs to build one marker.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerSpec {
    pub label: String,
    pub position: Vec3,
    pub size: f32,
    pub target: MarkerTarget,
}

/// Rendering side of navigation. The engine owns meshes, textures and the
/// page title; the navigator only tells it what to show.
pub trait SceneBackend {
    type Marker;
    type Texture;

    fn create_marker(&mut self, spec: &MarkerSpec) -> Self::Marker;
    fn dispose_marker(&mut self, marker: Self::Marker);
    /// Decorative yaw of a marker about the up axis, absolute.
    fn set_marker_spin(&mut self, marker: &Self::Marker, radians: f32);
    fn apply_image(&mut self, texture: Self::Texture, rotation: Rotation);
    fn set_title(&mut self, title: &str);
}

pub struct LiveMarker<M> {
    pub handle: M,
    pub target: MarkerTarget,
}

/// Outstanding image load for one transition.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageTicket {
    seq: u64,
    pub state_id: String,
    pub url: String,
    pub rotation: Rotation,
}

pub struct Navigator<B: SceneBackend> {
    tour: Rc<Tour>,
    backend: B,
    markers: SmallVec<[LiveMarker<B::Marker>; 8]>,
    seq: u64,
    applied_seq: u64,
    current: Option<String>,
}

impl<B: SceneBackend> Navigator<B> {
    pub fn new(tour: Rc<Tour>, backend: B) -> Self {
        Self {
            tour,
            backend,
            markers: SmallVec::new(),
            seq: 0,
            applied_seq: 0,
            current: None,
        }
    }

    /// Start a transition to `target_id`.
    ///
    /// An unknown id is a broken tour, not a runtime condition: the error is
    /// returned for the caller to abort with, and nothing is torn down.
    pub fn begin(&mut self, target_id: &str) -> PanoResult<ImageTicket> {
        let state = self.tour.state(target_id)?;
        let ticket = ImageTicket {
            seq: self.seq + 1,
            state_id: state.id.clone(),
            url: state.url.clone(),
            rotation: state.picture_rotation,
        };
        self.seq = ticket.seq;
        self.clear_markers();
        log::info!("[nav] -> {} ({})", ticket.state_id, ticket.url);
        Ok(ticket)
    }

    /// Complete a transition once its image load has settled. `texture` is
    /// `None` when the load failed; the previous image then stays up.
    ///
    /// Returns the entered state, or `None` when a newer transition has
    /// started since `ticket` was issued (or the ticket was already used).
    pub fn finish(&mut self, ticket: ImageTicket, texture: Option<B::Texture>) -> Option<&State> {
        if ticket.seq != self.seq || ticket.seq == self.applied_seq {
            log::debug!("[nav] dropping stale image for {}", ticket.state_id);
            return None;
        }
        let tour = Rc::clone(&self.tour);
        let state = tour.state(&ticket.state_id).ok()?;

        match texture {
            Some(t) => self.backend.apply_image(t, ticket.rotation),
            None => log::warn!("[nav] image for {} failed to load", state.id),
        }
        self.backend.set_title(&state.title);

        for link in &state.links {
            let spec = MarkerSpec {
                label: tour.title_of(&link.id).to_string(),
                position: marker_offset(link.rotation, MARKER_DISTANCE),
                size: MARKER_SIZE,
                target: MarkerTarget::State(link.id.clone()),
            };
            self.push_marker(spec);
        }
        for group in &state.group_links {
            let spec = MarkerSpec {
                label: group.title.clone(),
                position: marker_offset(group.rotation, MARKER_DISTANCE),
                size: MARKER_SIZE,
                target: MarkerTarget::Group {
                    title: group.title.clone(),
                    state_ids: group.state_ids.clone(),
                },
            };
            self.push_marker(spec);
        }
        log::debug!("[nav] {} markers for {}", self.markers.len(), state.id);

        self.applied_seq = ticket.seq;
        self.current = Some(state.id.clone());
        self.tour.state(&ticket.state_id).ok()
    }

    /// Ids of the states reachable through direct-link markers.
    pub fn link_targets(&self) -> Vec<&str> {
        self.markers
            .iter()
            .filter_map(|m| match &m.target {
                MarkerTarget::State(id) => Some(id.as_str()),
                MarkerTarget::Group { .. } => None,
            })
            .collect()
    }

    pub fn markers(&self) -> &[LiveMarker<B::Marker>] {
        &self.markers
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn spin_markers(&mut self, radians: f32) {
        for m in &self.markers {
            self.backend.set_marker_spin(&m.handle, radians);
        }
    }

    pub fn current_state_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// A transition has been started whose image has not landed yet.
    pub fn in_flight(&self) -> bool {
        self.seq != self.applied_seq
    }

    pub fn tour(&self) -> &Rc<Tour> {
        &self.tour
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn push_marker(&mut self, spec: MarkerSpec) {
        let handle = self.backend.create_marker(&spec);
        self.markers.push(LiveMarker {
            handle,
            target: spec.target,
        });
    }

    fn clear_markers(&mut self) {
        for m in self.markers.drain(..) {
            self.backend.dispose_marker(m.handle);
        }
    }
}

impl<B: SceneBackend> Navigator<B>
where
    B::Marker: PartialEq,
{
    /// Click target of the marker behind an engine handle.
    pub fn target_of(&self, handle: &B::Marker) -> Option<&MarkerTarget> {
        self.markers
            .iter()
            .find(|m| &m.handle == handle)
            .map(|m| &m.target)
    }
}

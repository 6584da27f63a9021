//! Tour description: an immutable graph of panoramic states.
//!
//! The JSON document is produced by the authoring tool and looks like
//! `{ firstStateId, states: [{ id, title, url, pictureRotation, links, ... }] }`.
//! Field names are camelCase on the wire and snake_case here.

use crate::config::join_url;
use crate::error::{PanoError, PanoResult};
use fnv::FnvHashMap;
use glam::Quat;
use serde::{Deserialize, Serialize};

/// Quaternion as written by the authoring tool.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Rotation {
    pub const IDENTITY: Rotation = Rotation {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Rotation> for Quat {
    fn from(r: Rotation) -> Self {
        Quat::from_xyzw(r.x, r.y, r.z, r.w)
    }
}

/// Directed edge to another state, rendered as a clickable marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Target state id.
    pub id: String,
    #[serde(default)]
    pub rotation: Rotation,
}

/// Fan-out link offering a choice between several states.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupLink {
    pub title: String,
    pub state_ids: Vec<String>,
    #[serde(default)]
    pub rotation: Rotation,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackgroundAudioInfo {
    pub id: String,
    pub src: String,
    /// Seconds; zero when the authoring tool did not record it.
    #[serde(default)]
    pub duration: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub picture_rotation: Rotation,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub group_links: Vec<GroupLink>,
    #[serde(default)]
    pub background_audio: Option<BackgroundAudioInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TourDocument {
    first_state_id: String,
    states: Vec<State>,
}

/// Loaded once at startup and never mutated afterwards.
#[derive(Clone, Debug, Deserialize)]
#[serde(from = "TourDocument")]
pub struct Tour {
    first_state_id: String,
    states: Vec<State>,
    index: FnvHashMap<String, usize>,
}

impl From<TourDocument> for Tour {
    fn from(doc: TourDocument) -> Self {
        Tour::new(doc.first_state_id, doc.states)
    }
}

impl Tour {
    pub fn new(first_state_id: impl Into<String>, states: Vec<State>) -> Self {
        let mut index = FnvHashMap::default();
        for (i, s) in states.iter().enumerate() {
            // first occurrence wins; duplicates are reported by `validate`
            index.entry(s.id.clone()).or_insert(i);
        }
        Self {
            first_state_id: first_state_id.into(),
            states,
            index,
        }
    }

    pub fn from_json(text: &str) -> PanoResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn first_state_id(&self) -> &str {
        &self.first_state_id
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, id: &str) -> PanoResult<&State> {
        self.index
            .get(id)
            .map(|&i| &self.states[i])
            .ok_or_else(|| PanoError::UnknownState(id.to_string()))
    }

    pub fn first_state(&self) -> PanoResult<&State> {
        self.state(&self.first_state_id)
    }

    /// Label for a marker pointing at `id`: the state's title, or the id
    /// itself when the target is missing or untitled.
    pub fn title_of<'a>(&'a self, id: &'a str) -> &'a str {
        match self.state(id) {
            Ok(s) if !s.title.is_empty() => &s.title,
            _ => id,
        }
    }

    /// Every integrity problem found in the graph. An empty list means the
    /// tour is safe to navigate from any state.
    pub fn validate(&self) -> Vec<PanoError> {
        let mut problems = Vec::new();
        if self.states.is_empty() {
            problems.push(PanoError::EmptyTour);
            return problems;
        }
        if !self.index.contains_key(&self.first_state_id) {
            problems.push(PanoError::UnknownState(self.first_state_id.clone()));
        }
        if self.index.len() != self.states.len() {
            let mut seen = FnvHashMap::default();
            for s in &self.states {
                let n = seen.entry(s.id.as_str()).or_insert(0u32);
                *n += 1;
                if *n == 2 {
                    problems.push(PanoError::DuplicateState(s.id.clone()));
                }
            }
        }
        for s in &self.states {
            let targets = s
                .links
                .iter()
                .map(|l| l.id.as_str())
                .chain(s.group_links.iter().flat_map(|g| g.state_ids.iter().map(String::as_str)));
            for to in targets {
                if !self.index.contains_key(to) {
                    problems.push(PanoError::DanglingLink {
                        from: s.id.clone(),
                        to: to.to_string(),
                    });
                }
            }
        }
        problems
    }

    /// Rewrite relative image and audio URLs so they are rooted at `base`.
    pub fn resolve_assets(&mut self, base: &str) {
        for s in &mut self.states {
            s.url = join_url(base, &s.url);
            if let Some(audio) = &mut s.background_audio {
                audio.src = join_url(base, &audio.src);
            }
        }
    }
}

//! Typed data components attached to scene nodes.
//!
//! A component is a capability a node carries (mesh, camera, light, or a
//! raw transform triplet) plus an identity and a back-handle to its
//! owner. Components hold data only; all manipulation goes through the
//! editor's command layer.

use glam::Vec3;
use uuid::Uuid;

use crate::node::NodeId;

/// Light source categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightType {
    Sun,
    Point,
    Spot,
    Area,
}

/// The closed set of component capabilities.
///
/// Queried by [`ComponentKind`] rather than by downcast; adding a
/// capability means adding a variant here and handling it in the match
/// arms that care.
#[derive(Clone, Debug, PartialEq)]
pub enum ComponentData {
    /// A bare transform triplet, independent of the owning node's own
    /// transform (e.g. a render offset).
    Transform {
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
    },
    /// A renderable mesh reference. Loading is the asset system's job;
    /// the scene only carries the path.
    Mesh { path: String, visible: bool },
    /// A camera the rendering backend can adopt.
    Camera { fov: f32, near: f32, far: f32 },
    /// A light source.
    Light {
        light_type: LightType,
        color: Vec3,
        intensity: f32,
        direction: Vec3,
        radius: f32,
    },
}

impl ComponentData {
    /// A transform component at the origin with unit scale.
    pub fn transform() -> Self {
        Self::Transform {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// A visible mesh component for the given asset path.
    pub fn mesh(path: impl Into<String>) -> Self {
        Self::Mesh {
            path: path.into(),
            visible: true,
        }
    }

    /// A perspective camera with common defaults.
    pub fn camera() -> Self {
        Self::Camera {
            fov: 60.0_f32.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }

    /// A white point light.
    pub fn point_light() -> Self {
        Self::Light {
            light_type: LightType::Point,
            color: Vec3::ONE,
            intensity: 1.0,
            direction: Vec3::NEG_Y,
            radius: 10.0,
        }
    }

    /// The discriminant used for query-by-kind.
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentData::Transform { .. } => ComponentKind::Transform,
            ComponentData::Mesh { .. } => ComponentKind::Mesh,
            ComponentData::Camera { .. } => ComponentKind::Camera,
            ComponentData::Light { .. } => ComponentKind::Light,
        }
    }
}

/// Field-less discriminant of [`ComponentData`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Transform,
    Mesh,
    Camera,
    Light,
}

/// A component instance owned by exactly one node.
#[derive(Clone, Debug)]
pub struct Component {
    uuid: Uuid,
    owner: NodeId,
    pub data: ComponentData,
}

impl Component {
    pub(crate) fn new(owner: NodeId, data: ComponentData) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            owner,
            data,
        }
    }

    /// Stable identity of this component.
    pub fn uuid(&self) -> &Uuid {
        &self.uuid
    }

    /// The node this component is attached to.
    pub fn owner(&self) -> NodeId {
        self.owner
    }

    /// Capability discriminant.
    pub fn kind(&self) -> ComponentKind {
        self.data.kind()
    }

    /// Attach-time hook, invoked once when the component joins a node.
    pub(crate) fn initialize(&mut self) {
        log::debug!("component {:?} ({}) initialized", self.kind(), self.uuid);
    }

    /// Per-frame hook, invoked from `Scene::update`. The built-in
    /// variants are pure data and have no per-frame work; the hook
    /// exists so the update order (ancestors first) is part of the
    /// contract.
    pub(crate) fn update(&mut self) {}

    /// Detach-time hook, invoked before the component is dropped.
    pub(crate) fn shutdown(&mut self) {
        log::debug!("component {:?} ({}) shut down", self.kind(), self.uuid);
    }
}

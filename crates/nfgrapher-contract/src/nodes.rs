//! Typed contracts for every known node kind.
//!
//! The table at the bottom of this file is the single declaration of each kind: its kind
//! identifier, ports, config fields and automatable parameters. [`node_contracts!`]
//! turns every entry into a struct with a static [`NodeSchema`], and builds the closed
//! [`NodeKind`] and [`TypedNode`] sums over all entries. Validation itself lives in
//! [`NodeReader`].

use nfgrapher_score::{ConfigMap, LoadingPolicy, Node, ParamMap};

use crate::content::{Port, PortMap};
use crate::enums::{DetectionMode, FilterType, KneeMode};
use crate::error::ContractError;
use crate::options::ContractOptions;
use crate::param::AudioParamInfo;
use crate::schema::{ConfigField, ConfigSpec, NodeReader, NodeSchema, ParamSpec};

macro_rules! config_field {
    (@read $reader:ident, $key:literal, required) => {
        $reader.required($key)?
    };
    (@read $reader:ident, $key:literal, optional $default:expr) => {
        $reader.optional($key, $default)?
    };
    (@default required) => {
        Default::default()
    };
    (@default optional $default:expr) => {
        $default
    };
    (@required required) => {
        true
    };
    (@required optional $default:expr) => {
        false
    };
}

macro_rules! node_contracts {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident($name:ident) {
                kind: $kind:literal,
                name: $short:literal,
                inputs: [$($input:literal),* $(,)?],
                outputs: [$($output:literal),* $(,)?],
                config: {
                    $($cfield:ident: $cty:ty => $ckey:literal, $cmode:ident $(($cdefault:expr))?;)*
                },
                params: {
                    $($pfield:ident => $pkey:literal = $pdefault:expr;)*
                },
            }
        )+
    ) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq)]
            pub struct $name {
                pub id: String,
                pub loading_policy: LoadingPolicy,
                $(pub $cfield: $cty,)*
                $(pub $pfield: AudioParamInfo,)*
            }

            impl $name {
                pub const KIND: &'static str = $kind;
                pub const NAME: &'static str = $short;
                pub const SCHEMA: NodeSchema = NodeSchema {
                    contract: stringify!($name),
                    kind: $kind,
                    name: $short,
                    inputs: PortMap::new(&[$(Port::audio($input)),*]),
                    outputs: PortMap::new(&[$(Port::audio($output)),*]),
                    config: &[$(
                        ConfigSpec {
                            key: $ckey,
                            field_type: <$cty as ConfigField>::FIELD_TYPE,
                            required: config_field!(@required $cmode $($cdefault)?),
                        },
                    )*],
                    params: &[$(ParamSpec { key: $pkey, default: $pdefault },)*],
                };

                /// A node with every field at its default. Required fields start empty.
                pub fn new(id: impl Into<String>) -> Self {
                    Self {
                        id: id.into(),
                        loading_policy: LoadingPolicy::default(),
                        $($cfield: config_field!(@default $cmode $($cdefault)?),)*
                        $($pfield: AudioParamInfo::new($pdefault),)*
                    }
                }

                pub fn from_node(node: &Node) -> Result<Self, ContractError> {
                    Self::from_node_with(node, &ContractOptions::default())
                }

                pub fn from_node_with(
                    node: &Node,
                    options: &ContractOptions,
                ) -> Result<Self, ContractError> {
                    let reader = NodeReader::new(&Self::SCHEMA, node, options)?;
                    let contract = Self {
                        id: reader.id(),
                        loading_policy: reader.loading_policy(),
                        $($cfield: config_field!(@read reader, $ckey, $cmode $($cdefault)?),)*
                        $($pfield: reader.param($pkey, $pdefault)?,)*
                    };
                    tracing::trace!(node = %contract.id, kind = Self::KIND, "typed node");
                    Ok(contract)
                }

                pub fn schema() -> &'static NodeSchema {
                    &Self::SCHEMA
                }

                pub fn inputs() -> PortMap {
                    Self::SCHEMA.inputs
                }

                pub fn outputs() -> PortMap {
                    Self::SCHEMA.outputs
                }

                /// Generic form of this node. Parameter initial values are not part of
                /// the document format, so only their commands are written.
                #[allow(unused_mut)]
                pub fn to_node(&self) -> Node {
                    let mut config = ConfigMap::new();
                    $(config.insert($ckey.to_string(), ConfigField::to_value(&self.$cfield));)*
                    let mut params = ParamMap::new();
                    $(
                        if self.$pfield.has_commands() {
                            params.insert($pkey.to_string(), self.$pfield.to_commands());
                        }
                    )*
                    Node {
                        id: self.id.clone(),
                        kind: Self::KIND.to_string(),
                        loading_policy: Some(self.loading_policy),
                        params: (!params.is_empty()).then_some(params),
                        config: (!config.is_empty()).then_some(config),
                    }
                }
            }

            impl TryFrom<&Node> for $name {
                type Error = ContractError;

                fn try_from(node: &Node) -> Result<Self, Self::Error> {
                    Self::from_node(node)
                }
            }

            impl From<$name> for TypedNode {
                fn from(node: $name) -> Self {
                    TypedNode::$variant(node)
                }
            }
        )+

        /// Every node kind with a contract.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum NodeKind {
            $($variant,)+
        }

        impl NodeKind {
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$variant),+];

            pub fn from_kind(kind: &str) -> Option<Self> {
                match kind {
                    $($kind => Some(NodeKind::$variant),)+
                    _ => None,
                }
            }

            pub fn schema(self) -> &'static NodeSchema {
                match self {
                    $(NodeKind::$variant => $name::schema(),)+
                }
            }
        }

        /// A node validated against the contract of its kind.
        #[derive(Debug, Clone, PartialEq)]
        pub enum TypedNode {
            $($variant($name),)+
        }

        impl TypedNode {
            pub fn from_node_with(
                node: &Node,
                options: &ContractOptions,
            ) -> Result<Self, ContractError> {
                let kind = NodeKind::from_kind(&node.kind).ok_or_else(|| {
                    ContractError::UnknownKind {
                        kind: node.kind.clone(),
                    }
                })?;
                match kind {
                    $(NodeKind::$variant => $name::from_node_with(node, options).map(TypedNode::$variant),)+
                }
            }

            pub fn node_kind(&self) -> NodeKind {
                match self {
                    $(TypedNode::$variant(_) => NodeKind::$variant,)+
                }
            }

            pub fn id(&self) -> &str {
                match self {
                    $(TypedNode::$variant(node) => &node.id,)+
                }
            }

            pub fn loading_policy(&self) -> LoadingPolicy {
                match self {
                    $(TypedNode::$variant(node) => node.loading_policy,)+
                }
            }

            pub fn to_node(&self) -> Node {
                match self {
                    $(TypedNode::$variant(node) => node.to_node(),)+
                }
            }
        }
    };
}

node_contracts! {
    /// Three-band equalizer.
    Eq3band(Eq3bandNode) {
        kind: "com.nativeformat.plugin.eq.eq3band",
        name: "eq3band",
        inputs: ["audio"],
        outputs: ["audio"],
        config: {},
        params: {
            low_cutoff => "lowCutoff" = 264.0;
            mid_frequency => "midFrequency" = 1000.0;
            high_cutoff => "highCutoff" = 3300.0;
            low_gain => "lowGain" = 0.0;
            mid_gain => "midGain" = 0.0;
            high_gain => "highGain" = 0.0;
        },
    }

    /// Plays an audio file. Times are nanoseconds.
    File(FileNode) {
        kind: "com.nativeformat.plugin.file.file",
        name: "file",
        inputs: [],
        outputs: ["audio"],
        config: {
            file: String => "file", required;
            when: i64 => "when", optional(0);
            duration: i64 => "duration", optional(0);
            offset: i64 => "offset", optional(0);
        },
        params: {},
    }

    /// White noise source.
    Noise(NoiseNode) {
        kind: "com.nativeformat.plugin.noise.noise",
        name: "noise",
        inputs: [],
        outputs: ["audio"],
        config: {
            when: i64 => "when", optional(0);
            duration: i64 => "duration", optional(0);
        },
        params: {},
    }

    Silence(SilenceNode) {
        kind: "com.nativeformat.plugin.noise.silence",
        name: "silence",
        inputs: [],
        outputs: ["audio"],
        config: {
            when: i64 => "when", optional(0);
            duration: i64 => "duration", optional(0);
        },
        params: {},
    }

    /// Repeats a window of its input. A `loop_count` of -1 loops forever.
    Loop(LoopNode) {
        kind: "com.nativeformat.plugin.time.loop",
        name: "loop",
        inputs: ["audio"],
        outputs: ["audio"],
        config: {
            when: i64 => "when", required;
            duration: i64 => "duration", required;
            loop_count: i64 => "loopCount", optional(-1);
        },
        params: {},
    }

    /// Time stretch and pitch shift.
    Stretch(StretchNode) {
        kind: "com.nativeformat.plugin.time.stretch",
        name: "stretch",
        inputs: ["audio"],
        outputs: ["audio"],
        config: {},
        params: {
            pitch_ratio => "pitchRatio" = 1.0;
            stretch => "stretch" = 1.0;
            formant_ratio => "formantRatio" = 1.0;
        },
    }

    Delay(DelayNode) {
        kind: "com.nativeformat.plugin.waa.delay",
        name: "delay",
        inputs: ["audio"],
        outputs: ["audio"],
        config: {},
        params: {
            delay_time => "delayTime" = 0.0;
        },
    }

    Gain(GainNode) {
        kind: "com.nativeformat.plugin.waa.gain",
        name: "gain",
        inputs: ["audio"],
        outputs: ["audio"],
        config: {},
        params: {
            gain => "gain" = 1.0;
        },
    }

    /// Sine oscillator. `frequency` is in hertz.
    Sine(SineNode) {
        kind: "com.nativeformat.plugin.wave.sine",
        name: "sine",
        inputs: [],
        outputs: ["audio"],
        config: {
            frequency: f64 => "frequency", optional(0.0);
            when: i64 => "when", optional(0);
            duration: i64 => "duration", optional(0);
        },
        params: {},
    }

    Filter(FilterNode) {
        kind: "com.nativeformat.plugin.eq.filter",
        name: "filter",
        inputs: ["audio"],
        outputs: ["audio"],
        config: {
            filter_type: FilterType => "filterType", optional(FilterType::BandPass);
        },
        params: {
            low_cutoff => "lowCutoff" = 0.0;
            high_cutoff => "highCutoff" = 22050.0;
        },
    }

    /// Dynamic range compressor with an optional sidechain input.
    Compressor(CompressorNode) {
        kind: "com.nativeformat.plugin.compressor.compressor",
        name: "compressor",
        inputs: ["audio", "sidechain"],
        outputs: ["audio"],
        config: {
            detection_mode: DetectionMode => "detectionMode", optional(DetectionMode::Max);
            knee_mode: KneeMode => "kneeMode", optional(KneeMode::Hard);
            cutoffs: Vec<f64> => "cutoffs", optional(Vec::new());
        },
        params: {
            threshold_db => "thresholdDb" = -24.0;
            knee_db => "kneeDb" = 30.0;
            ratio_db => "ratioDb" = 12.0;
            attack => "attack" = 0.0003;
            release => "release" = 0.25;
        },
    }

    /// Downward expander; mirrors the compressor's controls.
    Expander(ExpanderNode) {
        kind: "com.nativeformat.plugin.compressor.expander",
        name: "expander",
        inputs: ["audio", "sidechain"],
        outputs: ["audio"],
        config: {
            detection_mode: DetectionMode => "detectionMode", optional(DetectionMode::Max);
            knee_mode: KneeMode => "kneeMode", optional(KneeMode::Hard);
            cutoffs: Vec<f64> => "cutoffs", optional(Vec::new());
        },
        params: {
            threshold_db => "thresholdDb" = -24.0;
            knee_db => "kneeDb" = 30.0;
            ratio_db => "ratioDb" = 12.0;
            attack => "attack" = 0.0003;
            release => "release" = 0.25;
        },
    }

    /// Compressor and expander sharing one detector.
    Compander(CompanderNode) {
        kind: "com.nativeformat.plugin.compressor.compander",
        name: "compander",
        inputs: ["audio", "sidechain"],
        outputs: ["audio"],
        config: {
            detection_mode: DetectionMode => "detectionMode", optional(DetectionMode::Max);
            knee_mode: KneeMode => "kneeMode", optional(KneeMode::Hard);
            cutoffs: Vec<f64> => "cutoffs", optional(Vec::new());
        },
        params: {
            compressor_threshold_db => "compressorThresholdDb" = -24.0;
            compressor_knee_db => "compressorKneeDb" = 30.0;
            compressor_ratio_db => "compressorRatioDb" = 12.0;
            expander_threshold_db => "expanderThresholdDb" = -24.0;
            expander_knee_db => "expanderKneeDb" = 30.0;
            expander_ratio_db => "expanderRatioDb" = 12.0;
            attack => "attack" = 0.0003;
            release => "release" = 0.25;
        },
    }
}

pub mod capability;
pub mod frame;
pub mod pose_trait;
pub mod random;
pub mod recognizer;
pub mod registry;
pub mod scripted_pose;
pub mod training;

pub use capability::PoseCapability;
pub use frame::{FrameSource, SyntheticCamera, VideoFrame};
pub use pose_trait::{Keypoint, Pose, PoseEstimator};
pub use random::{RandomSource, StdRandom};
pub use recognizer::{RecognitionHandle, RecognitionSimulator, SharedLedger, TranscriptObserver};
pub use registry::PoseRegistry;
pub use scripted_pose::ScriptedEstimator;
pub use training::TrainingSession;

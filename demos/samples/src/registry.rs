use xrloop::Scene;

use crate::scenes::{
    HitTest, ImmersiveAr, Photo360, PositionalAudio, SolarSystem, SpectatorMode, StereoVideo,
};

/// A sample scene, and how to make one
#[derive(Debug, Clone, Copy)]
pub struct SampleInfo {
    /// What to ask for on the command line, eg. `solar-system`
    pub name: &'static str,
    /// Human readable name
    pub title: &'static str,
    /// The heading the sample is listed under
    pub category: &'static str,
    /// One line on what the sample shows
    pub description: &'static str,
    /// Build a fresh, not yet set up, scene
    pub create: fn() -> Box<dyn Scene>,
}

fn create<S: Scene + Default + 'static>() -> Box<dyn Scene> {
    Box::<S>::default()
}

/// Every sample, in the order they're listed
pub const SAMPLES: &[SampleInfo] = &[
    SampleInfo {
        name: "immersive-ar",
        title: "Immersive AR",
        category: "Basics",
        description: "A spinning cube half a metre in front of you",
        create: create::<ImmersiveAr>,
    },
    SampleInfo {
        name: "hit-test",
        title: "Hit Test",
        category: "AR",
        description: "A reticle that sits wherever you look at a real surface",
        create: create::<HitTest>,
    },
    SampleInfo {
        name: "solar-system",
        title: "Solar System",
        category: "AR",
        description: "The earth, spinning, with the moon going round it",
        create: create::<SolarSystem>,
    },
    SampleInfo {
        name: "positional-audio",
        title: "Positional Audio",
        category: "Media",
        description: "A looping sound that gets quieter as you walk away from it",
        create: create::<PositionalAudio>,
    },
    SampleInfo {
        name: "photo-360",
        title: "360° Photo",
        category: "Media",
        description: "Stand inside a panorama",
        create: create::<Photo360>,
    },
    SampleInfo {
        name: "stereo-video",
        title: "Stereo Video",
        category: "Media",
        description: "Stand inside a looping video",
        create: create::<StereoVideo>,
    },
    SampleInfo {
        name: "spectator-mode",
        title: "Spectator Mode",
        category: "Advanced",
        description: "Watch someone else's session from a second camera",
        create: create::<SpectatorMode>,
    },
];

/// Look a sample up by name
pub fn find(name: &str) -> Option<&'static SampleInfo> {
    SAMPLES.iter().find(|sample| sample.name == name)
}

/// Every category, in the order its first sample is listed
pub fn categories() -> Vec<&'static str> {
    let mut categories = Vec::new();
    for sample in SAMPLES {
        if !categories.contains(&sample.category) {
            categories.push(sample.category);
        }
    }
    categories
}

/// The samples listed under `category`
pub fn in_category(category: &str) -> impl Iterator<Item = &'static SampleInfo> + '_ {
    SAMPLES.iter().filter(move |sample| sample.category == category)
}

/// The name of every sample
pub fn names() -> Vec<&'static str> {
    SAMPLES.iter().map(|sample| sample.name).collect()
}

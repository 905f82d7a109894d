use bevy::prelude::Event;

/// Interaction feedback cues. Fire-and-forget: emitting one never blocks or
/// fails the transition that produced it.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    NodeClick,
    MarqueeStart,
    MarqueeCommit,
}

#[cfg(feature = "audio")]
pub mod playback {
    use bevy::prelude::*;

    use super::Cue;

    #[derive(Resource)]
    pub struct CueSounds {
        node_click: Handle<AudioSource>,
        marquee_start: Handle<AudioSource>,
        marquee_commit: Handle<AudioSource>,
    }

    pub fn setup(mut commands: Commands, assets: Res<AssetServer>) {
        commands.insert_resource(CueSounds {
            node_click: assets.load("sounds/node_click.ogg"),
            marquee_start: assets.load("sounds/marquee_start.ogg"),
            marquee_commit: assets.load("sounds/marquee_commit.ogg"),
        });
    }

    pub fn play(mut commands: Commands, sounds: Res<CueSounds>, mut cues: EventReader<Cue>) {
        for cue in cues.read() {
            let source = match cue {
                Cue::NodeClick => sounds.node_click.clone(),
                Cue::MarqueeStart => sounds.marquee_start.clone(),
                Cue::MarqueeCommit => sounds.marquee_commit.clone(),
            };
            commands.spawn(AudioBundle {
                source,
                settings: PlaybackSettings::DESPAWN,
            });
        }
    }
}

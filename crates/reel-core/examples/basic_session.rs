//! Basic session example
//!
//! Walks through playback, flagging, search and playlists over the bundled
//! catalog.
//!
//! Run with: cargo run -p reel-core --example basic_session

use rand::{rngs::StdRng, SeedableRng};
use reel_core::{NowPlaying, PlaybackSession, SessionConfig, VideoLibrary};

fn main() -> reel_core::Result<()> {
    println!("Reel Core - Basic Session Example");
    println!("=================================\n");

    let mut session = PlaybackSession::new(VideoLibrary::bundled(), SessionConfig::default());
    println!("{} videos in the library\n", session.number_of_videos());

    println!("Catalog:");
    for video in session.list_videos() {
        println!("  {}", video);
    }
    println!();

    // Playback state machine
    let outcome = session.play("amazing_cats_video_id")?;
    println!("Playing video: {}", outcome.playing.title);

    session.pause()?;
    if let NowPlaying::Playing { video, paused } = session.show_playing() {
        println!("Currently playing: {} (paused: {})", video, paused);
    }

    let outcome = session.play_random(&mut StdRng::seed_from_u64(7))?;
    if let Some(stopped) = outcome.stopped {
        println!("Stopping video: {}", stopped.title);
    }
    println!("Playing video: {}\n", outcome.playing.title);

    // Flags hide videos from search
    session.flag("another_cat_video_id", Some("Needs review"))?;
    let results = session.search("cat");
    println!("Here are the results for {}:", results.query);
    for (rank, video) in results.ranked() {
        println!("  {}) {}", rank, video);
    }
    println!();

    // Playlists keep flagged members visible
    session.create_playlist("Cats")?;
    session.add_to_playlist("cats", "amazing_cats_video_id")?;
    session.unflag("another_cat_video_id")?;
    session.add_to_playlist("CATS", "another_cat_video_id")?;
    session.flag("another_cat_video_id", None)?;

    let playlist = session.show_playlist("Cats")?;
    println!("Showing playlist: {}", playlist.name);
    for video in &playlist.videos {
        println!("  {}", video);
    }

    println!("\n{} session events recorded", session.events().count());
    println!("\nExample complete!");

    Ok(())
}

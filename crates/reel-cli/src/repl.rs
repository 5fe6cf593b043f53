//! Interactive command loop

use crate::commands::{execute, select_result, Command, Reply};
use crate::output::{render, OutputFormat};
use rand::Rng;
use reel_core::PlaybackSession;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Read commands from `input` until EXIT or end of input
pub fn run<I, W, R>(
    session: &mut PlaybackSession,
    rng: &mut R,
    input: I,
    mut output: W,
    format: OutputFormat,
) -> anyhow::Result<()>
where
    I: BufRead,
    W: Write,
    R: Rng + ?Sized,
{
    if format == OutputFormat::Text {
        writeln!(output, "Hello and welcome to Reel, what would you like to do?")?;
        writeln!(output, "Enter HELP for list of available commands or EXIT to terminate.")?;
    }

    let mut lines = input.lines();

    while let Some(line) = lines.next() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                warn!(error = %e, "Rejected command");
                emit(&mut output, &Reply::from(e), format)?;
                continue;
            }
        };
        debug!(?command, "Executing");

        let reply = execute(session, &command, rng);
        emit(&mut output, &reply, format)?;

        match reply {
            Reply::Exit => break,
            Reply::SearchResults { ref results } if !results.is_empty() => {
                // Next line answers the "play one of these?" prompt
                let choice = match lines.next() {
                    Some(choice) => choice?,
                    None => break,
                };
                let reply = select_result(session, &command, results, &choice);
                emit(&mut output, &reply, format)?;
            }
            _ => {}
        }
    }

    output.flush()?;
    Ok(())
}

fn emit<W: Write>(output: &mut W, reply: &Reply, format: OutputFormat) -> std::io::Result<()> {
    for line in render(reply, format) {
        writeln!(output, "{}", line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use reel_core::{SessionConfig, VideoLibrary};
    use std::io::Cursor;

    fn transcript(script: &str, format: OutputFormat) -> Vec<String> {
        let mut session = PlaybackSession::new(VideoLibrary::bundled(), SessionConfig::default());
        let mut rng = StdRng::seed_from_u64(9);
        let mut out = Vec::new();
        run(&mut session, &mut rng, Cursor::new(script), &mut out, format).unwrap();
        String::from_utf8(out).unwrap().lines().map(String::from).collect()
    }

    #[test]
    fn test_playback_transcript() {
        let lines = transcript(
            "PLAY amazing_cats_video_id\nPLAY funny_dogs_video_id\nPAUSE\nPAUSE\n\
             SHOW_PLAYING\nSTOP\nSTOP\nEXIT\nPLAY x\n",
            OutputFormat::Text,
        );
        assert_eq!(
            &lines[2..],
            [
                "Playing video: Amazing Cats",
                "Stopping video: Amazing Cats",
                "Playing video: Funny Dogs",
                "Pausing video: Funny Dogs",
                "Video already paused: Funny Dogs",
                "Currently playing: Funny Dogs (funny_dogs_video_id) [#dog #animal] - PAUSED",
                "Stopping video: Funny Dogs",
                "Cannot stop video: No video is currently playing",
                "Reel has now terminated its execution. Thank you and goodbye!",
            ]
        );
    }

    #[test]
    fn test_search_prompt_plays_choice() {
        let lines = transcript(
            "SEARCH_VIDEOS cat\n2\nSEARCH_VIDEOS blah\nSEARCH_VIDEOS_WITH_TAG #cat\nno\n",
            OutputFormat::Text,
        );
        assert_eq!(
            &lines[2..],
            [
                "Here are the results for cat:",
                "  1) Amazing Cats (amazing_cats_video_id) [#cat #animal]",
                "  2) Another Cat Video (another_cat_video_id) [#cat #animal]",
                "Would you like to play any of the above? If yes, specify the number of the video.",
                "If your answer is not a valid number, we will assume it's a no.",
                "Playing video: Another Cat Video",
                "No search results for blah",
                "Here are the results for #cat:",
                "  1) Amazing Cats (amazing_cats_video_id) [#cat #animal]",
                "  2) Another Cat Video (another_cat_video_id) [#cat #animal]",
                "Would you like to play any of the above? If yes, specify the number of the video.",
                "If your answer is not a valid number, we will assume it's a no.",
            ]
        );
    }

    #[test]
    fn test_playlist_transcript() {
        let lines = transcript(
            "CREATE_PLAYLIST my_PLAYlist\nCREATE_PLAYLIST MY_playlist\n\
             ADD_TO_PLAYLIST my_playlist amazing_cats_video_id\n\
             FLAG_VIDEO amazing_cats_video_id dont_like_cats\n\
             SHOW_PLAYLIST MY_PLAYLIST\nSHOW_ALL_PLAYLISTS\n\
             REMOVE_FROM_PLAYLIST other amazing_cats_video_id\nDANCE\n",
            OutputFormat::Text,
        );
        assert_eq!(
            &lines[2..],
            [
                "Successfully created new playlist: my_PLAYlist",
                "Cannot create playlist: A playlist with the same name already exists",
                "Added video to my_playlist: Amazing Cats",
                "Successfully flagged video: Amazing Cats (reason: dont_like_cats)",
                "Showing playlist: MY_PLAYLIST",
                "  Amazing Cats (amazing_cats_video_id) [#cat #animal] \
                 - FLAGGED (reason: dont_like_cats)",
                "Showing all playlists:",
                "  my_PLAYlist",
                "Cannot remove video from other: Playlist does not exist",
                "Please enter a valid command, type HELP for a list of available commands.",
            ]
        );
    }

    #[test]
    fn test_json_output() {
        let lines = transcript("NUMBER_OF_VIDEOS\nSTOP\n", OutputFormat::Json);
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["reply"], "video_count");
        assert_eq!(first["count"], 5);

        let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(second["reply"], "failed");
        assert_eq!(second["action"], "Cannot stop video");
        assert_eq!(second["code"], "NOTHING_PLAYING");
    }

    #[test]
    fn test_json_output_rejected_command() {
        let lines = transcript("DANCE\nPLAY\nNUMBER_OF_VIDEOS\n", OutputFormat::Json);
        assert_eq!(lines.len(), 3);

        let values: Vec<serde_json::Value> =
            lines.iter().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(values[0]["reply"], "invalid");
        assert_eq!(values[0]["message"], "unknown command: DANCE");
        assert_eq!(values[1]["reply"], "invalid");
        assert_eq!(values[2]["reply"], "video_count");
    }
}

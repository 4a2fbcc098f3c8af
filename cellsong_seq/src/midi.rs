// MIDI capture of a driver performance.
//
// Replays a fixed number of driver ticks into a Standard MIDI File:
// track 0 carries the tempo, track 1 the sequence. A note sounds from the
// tick it is struck until the playhead lands on a silent step or a
// different pitch, so repeated pitches hold rather than retrigger.
//
// Uses the `midly` crate. Output is SMF Format 1 (multi-track). Live
// audio synthesis is out of scope; this is the offline rendering path.

use crate::driver::{SequencerDriver, TickOutput};
use cellsong_automata::error::RowError;
use midly::{
    Format, Header, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::path::Path;

/// Ticks per quarter note in MIDI output.
const TICKS_PER_QUARTER: u16 = 480;

/// GM program for the sequence track: a plain synth lead.
const PROGRAM_SYNTH_LEAD: u8 = 80;

/// Run the driver for `ticks` steps and write the capture to `path`.
pub fn write_midi(
    driver: &mut SequencerDriver,
    ticks: usize,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let smf = capture(driver, ticks)?;
    let mut buf = Vec::new();
    smf.write(&mut buf)?;
    std::fs::write(path, &buf)?;
    Ok(())
}

/// Run the driver for `ticks` steps and build the in-memory SMF.
pub fn capture(
    driver: &mut SequencerDriver,
    ticks: usize,
) -> Result<Smf<'static>, RowError> {
    let outputs: Vec<TickOutput> = (0..ticks)
        .map(|_| driver.tick())
        .collect::<Result<_, _>>()?;

    let bpm = driver.config().bpm;
    let midi_ticks_per_step = (f32::from(TICKS_PER_QUARTER) * driver.config().rate) as u32;
    Ok(outputs_to_smf(&outputs, bpm, midi_ticks_per_step))
}

/// Assemble captured tick outputs into an SMF.
fn outputs_to_smf(outputs: &[TickOutput], bpm: f32, ticks_per_step: u32) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    // Track 0: tempo track.
    let mut tempo_track: Track<'static> = Vec::new();
    let tempo_microseconds = (60_000_000.0 / bpm) as u32;
    tempo_track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::Tempo(u24::new(tempo_microseconds))),
    });
    tempo_track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::EndOfTrack),
    });
    smf.tracks.push(tempo_track);

    // Track 1: the sequence.
    let channel = u4::new(0);
    let mut track: Track<'static> = Vec::new();
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::TrackName(b"Cellsong")),
    });
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Midi {
            channel,
            message: MidiMessage::ProgramChange {
                program: u7::new(PROGRAM_SYNTH_LEAD),
            },
        },
    });

    let mut last_event_tick: u32 = 0;
    let mut sounding: Option<u8> = None;

    for (i, out) in outputs.iter().enumerate() {
        let step_tick = i as u32 * ticks_per_step;

        match out.note {
            Some(event) => {
                // Same pitch still gated: hold, no retrigger.
                if sounding == Some(event.key) {
                    continue;
                }
                if let Some(prev) = sounding.take() {
                    track.push(note_off(channel, prev, step_tick - last_event_tick));
                    last_event_tick = step_tick;
                }
                track.push(TrackEvent {
                    delta: u28::new(step_tick - last_event_tick),
                    kind: TrackEventKind::Midi {
                        channel,
                        message: MidiMessage::NoteOn {
                            key: u7::new(event.key),
                            vel: u7::new(event.velocity),
                        },
                    },
                });
                last_event_tick = step_tick;
                sounding = Some(event.key);
            }
            None => {
                if let Some(prev) = sounding.take() {
                    track.push(note_off(channel, prev, step_tick - last_event_tick));
                    last_event_tick = step_tick;
                }
            }
        }
    }

    // End the final note at the capture boundary.
    if let Some(prev) = sounding.take() {
        let end_tick = outputs.len() as u32 * ticks_per_step;
        track.push(note_off(channel, prev, end_tick - last_event_tick));
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::EndOfTrack),
    });
    smf.tracks.push(track);

    smf
}

fn note_off(channel: u4, key: u8, delta: u32) -> TrackEvent<'static> {
    TrackEvent {
        delta: u28::new(delta),
        kind: TrackEventKind::Midi {
            channel,
            message: MidiMessage::NoteOff {
                key: u7::new(key),
                vel: u7::new(0),
            },
        },
    }
}

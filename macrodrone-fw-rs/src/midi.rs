//! MIDI transports: USB-MIDI and DIN (UART) input.
//!
//! Both transport tasks frame raw bytes into [`MidiEvent`]s and push them
//! into the same [`MIDI_EVENTS`] channel, so the UI task sees one stream
//! in arrival order.

use defmt::*;
use embassy_rp::peripherals::USB;
use embassy_rp::uart::{self, UartRx};
use embassy_rp::usb::Driver;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_usb::class::midi::MidiClass;
use embassy_usb::UsbDevice;

use macrodrone::{usb_packet_event, DinFramer, MidiEvent};

/// Merged note stream from every transport, drained by the UI task.
pub static MIDI_EVENTS: Channel<CriticalSectionRawMutex, MidiEvent, 16> = Channel::new();

/// Standard DIN MIDI baud rate.
pub const DIN_BAUD: u32 = 31_250;

// ── Tasks ────────────────────────────────────────────────────────────────

/// Reads DIN MIDI from the UART one byte at a time.
#[embassy_executor::task]
pub async fn din_midi_task(mut rx: UartRx<'static, uart::Async>) {
    info!("DIN MIDI task started");
    let mut framer = DinFramer::new();
    let mut byte = [0u8; 1];

    loop {
        if rx.read(&mut byte).await.is_err() {
            // Framing or overrun error: drop the partial message.
            warn!("DIN MIDI read error");
            framer.reset();
            continue;
        }

        if let Some(event) = framer.push(byte[0]) {
            if !matches!(event, MidiEvent::Other) {
                MIDI_EVENTS.send(event).await;
            }
        }
    }
}

/// Runs the USB device stack.
#[embassy_executor::task]
pub async fn usb_device_task(mut usb: UsbDevice<'static, Driver<'static, USB>>) -> ! {
    usb.run().await
}

/// Reads USB-MIDI event packets (4 bytes each: cable/CIN + 3 MIDI bytes).
#[embassy_executor::task]
pub async fn usb_midi_task(mut class: MidiClass<'static, Driver<'static, USB>>) {
    let mut buf = [0u8; 64];

    loop {
        class.wait_connection().await;
        info!("USB MIDI connected");

        loop {
            let n = match class.read_packet(&mut buf).await {
                Ok(n) => n,
                Err(_) => break,
            };

            for packet in buf[..n].chunks_exact(4) {
                match usb_packet_event(packet) {
                    Some(MidiEvent::Other) | None => {}
                    Some(event) => MIDI_EVENTS.send(event).await,
                }
            }
        }

        info!("USB MIDI disconnected");
    }
}

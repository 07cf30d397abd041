//! macrodrone-fw
//!
//! Macropad drone synth firmware for the RP2350. Wires the parameter store,
//! the Seesaw encoder driver and two MIDI transports into a live loop:
//!
//! 1. The UI task (core 0) scans the key bank, samples the encoder and its
//!    push switch, and drains the merged MIDI event queue. It owns the
//!    store's only writer.
//! 2. The USB-MIDI and DIN MIDI tasks (core 0) frame incoming bytes and
//!    push note events into the shared queue.
//! 3. The audio task (core 1) reads parameter snapshots and forwards
//!    envelope edges to the voice engine.

#![no_std]
#![no_main]

mod keys;
mod midi;

use defmt::*;
use embassy_executor::{Executor, Spawner};
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_rp::peripherals::{I2C0, TRNG, UART0, USB};
use embassy_rp::trng::{self, Trng};
use embassy_rp::uart::{self, UartRx};
use embassy_rp::usb::{self, Driver};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant, Ticker};
use embassy_usb::class::midi::MidiClass;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use macrodrone::{
    Debouncer, EnvelopeEdge, InputEvent, NoteControl, ParameterStore, UiController,
    VariantConfig, NUM_KEYS,
};
use seesaw_encoder::{RotaryEncoder, DEFAULT_ADDRESS};

use crate::keys::KeyScanner;
use crate::midi::{din_midi_task, usb_device_task, usb_midi_task, DIN_BAUD, MIDI_EVENTS};

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
    UART0_IRQ => uart::InterruptHandler<UART0>;
    USBCTRL_IRQ => usb::InterruptHandler<USB>;
    TRNG_IRQ => trng::InterruptHandler<TRNG>;
});

// ---------------------------------------------------------------------------
// Variant selection
// ---------------------------------------------------------------------------

#[cfg(not(feature = "wide-ranges"))]
const VARIANT: VariantConfig = macrodrone::DRONESYNTH;

#[cfg(feature = "wide-ranges")]
const VARIANT: VariantConfig = macrodrone::DRONESYNTH_WIDE;

/// Key, encoder switch and MIDI queue polling period.
const UI_TICK: Duration = Duration::from_millis(5);

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

/// Parameter state. Written only by the UI task; read lock-free by the
/// audio task on the other core.
static PARAM_STORE: StaticCell<ParameterStore> = StaticCell::new();

/// Note gate changes from the UI task to the audio task.
static ENVELOPE_EDGES: Channel<CriticalSectionRawMutex, EnvelopeEdge, 8> = Channel::new();

static mut CORE1_STACK: Stack<4096> = Stack::new();
static EXECUTOR1: StaticCell<Executor> = StaticCell::new();

// USB descriptor and control buffers
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

// ---------------------------------------------------------------------------
// Type aliases
// ---------------------------------------------------------------------------

type EncoderI2c = I2c<'static, I2C0, i2c::Async>;

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Front-panel and MIDI dispatch task.
///
/// Every tick it scans the keys, reads the encoder position when a sample
/// slot is due, debounces the push switch, then applies every queued MIDI
/// event. Envelope edges are forwarded to core 1.
#[embassy_executor::task]
async fn ui_task(
    mut ui: UiController<'static, NUM_KEYS, SmallRng>,
    mut scanner: KeyScanner,
    mut encoder: RotaryEncoder<EncoderI2c>,
) {
    info!("UI task started");

    let mut ticker = Ticker::every(UI_TICK);
    let mut switch = Debouncer::default();

    loop {
        ticker.next().await;
        let now_ms = Instant::now().as_millis();

        scanner.scan(|index, pressed| {
            ui.handle_input(InputEvent::KeyEdge { index, pressed });
        });

        // Skip bus traffic between sample slots.
        if ui.encoder_due(now_ms) {
            match encoder.read_position().await {
                Ok(raw_position) => {
                    ui.handle_input(InputEvent::EncoderTick { raw_position, now_ms });
                }
                Err(e) => warn!("Encoder read failed: {}", e),
            }
        }

        match encoder.switch_pressed().await {
            Ok(level) => {
                if let Some(pressed) = switch.update(level) {
                    ui.handle_input(InputEvent::SwitchEdge { pressed });
                }
            }
            Err(e) => warn!("Switch read failed: {}", e),
        }

        while let Ok(event) = MIDI_EVENTS.try_receive() {
            if let Some(edge) = ui.handle_midi(event) {
                if ENVELOPE_EDGES.try_send(edge).is_err() {
                    warn!("Envelope queue full, dropping {}", edge);
                }
            }
        }
    }
}

/// Voice engine side of the store, running on core 1.
///
/// Tracks the gate from envelope edges and picks up a fresh snapshot
/// whenever the store's revision moves.
#[embassy_executor::task]
async fn audio_task(store: &'static ParameterStore) {
    info!("Audio task started on core 1");

    let mut ticker = Ticker::every(Duration::from_millis(1));
    let mut snapshot = store.snapshot();
    let mut control = NoteControl::of(store);
    let mut gate: Option<u8> = None;

    loop {
        ticker.next().await;

        while let Ok(edge) = ENVELOPE_EDGES.try_receive() {
            match edge {
                EnvelopeEdge::Attack { note, velocity } => {
                    gate = Some(note);
                    debug!("gate on: note={} vel={}", note, velocity);
                }
                EnvelopeEdge::Release { note } => {
                    // Only the sounding note closes the gate.
                    if gate == Some(note) {
                        gate = None;
                        debug!("gate off: note={}", note);
                    }
                }
            }
        }

        if store.revision() != snapshot.revision {
            snapshot = store.snapshot();

            let now = NoteControl::of(store);
            if now != control {
                control = now;
                info!("root note control: {}", control);
            }

            trace!(
                "params rev={} root={} scatter={} filter={} vol={} drone={}",
                snapshot.revision,
                snapshot.root_note(),
                snapshot.scatter(),
                snapshot.filter(),
                snapshot.volume(),
                snapshot.drone_mode
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("macrodrone-fw starting: {}", VARIANT.name);

    if let Err(e) = VARIANT.validate() {
        error!("Invalid variant config: {}", e);
    }

    // —— Pin assignments ————————————————————————————————————————————————————
    // KEY0..KEY11 → GP1..GP12  active-low, pull-up enabled
    // MIDI_RX     → GP13       (UART0 RX, 31250 baud)
    // I2C_SDA     → GP20
    // I2C_SCL     → GP21
    // ———————————————————————————————————————————————————————————————————————

    let key_pins: [Input<'static>; NUM_KEYS] = [
        Input::new(p.PIN_1, Pull::Up),
        Input::new(p.PIN_2, Pull::Up),
        Input::new(p.PIN_3, Pull::Up),
        Input::new(p.PIN_4, Pull::Up),
        Input::new(p.PIN_5, Pull::Up),
        Input::new(p.PIN_6, Pull::Up),
        Input::new(p.PIN_7, Pull::Up),
        Input::new(p.PIN_8, Pull::Up),
        Input::new(p.PIN_9, Pull::Up),
        Input::new(p.PIN_10, Pull::Up),
        Input::new(p.PIN_11, Pull::Up),
        Input::new(p.PIN_12, Pull::Up),
    ];
    let scanner = KeyScanner::new(key_pins);

    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c::Config::default(),
    );

    let mut uart_config = uart::Config::default();
    uart_config.baudrate = DIN_BAUD;
    let midi_rx = UartRx::new(p.UART0, p.PIN_13, Irqs, p.DMA_CH0, uart_config);

    // —— Parameter store ————————————————————————————————————————————————————

    let store: &'static ParameterStore = PARAM_STORE.init(ParameterStore::new(VARIANT));
    let Some(writer) = store.writer() else {
        core::panic!("parameter writer already claimed");
    };
    // Chord randomize seed from the hardware TRNG.
    let mut trng = Trng::new(p.TRNG, Irqs, trng::Config::default());
    let mut seed = [0u8; 8];
    trng.fill_bytes(&mut seed).await;
    let rng = SmallRng::seed_from_u64(u64::from_le_bytes(seed));
    let mut ui = UiController::new(writer, rng);

    // —— Encoder initialisation —————————————————————————————————————————————

    let mut encoder = RotaryEncoder::new(i2c, DEFAULT_ADDRESS);
    if let Err(e) = encoder.init().await {
        error!("Encoder init failed: {}", e);
    }

    // Re-zero so the first sample does not jump by the power-on count.
    // If that fails, fall back to whatever the hardware reports.
    if let Err(e) = encoder.set_position(0).await {
        warn!("Could not zero encoder: {}", e);
        match encoder.read_position().await {
            Ok(position) => {
                info!("Initial encoder position: {}", position);
                ui.set_encoder_baseline(position);
            }
            Err(_) => warn!("Could not read initial encoder position; starting from 0"),
        }
    }

    // —— USB MIDI ———————————————————————————————————————————————————————————

    let driver = Driver::new(p.USB, Irqs);

    let mut usb_config = embassy_usb::Config::new(0x1209, 0x0001);
    usb_config.manufacturer = Some("macrodrone");
    usb_config.product = Some(VARIANT.name);
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let mut builder = embassy_usb::Builder::new(
        driver,
        usb_config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        &mut [],
        CONTROL_BUF.init([0; 64]),
    );
    let midi_class = MidiClass::new(&mut builder, 1, 1, 64);
    let usb = builder.build();

    // —— Core 1 —————————————————————————————————————————————————————————————

    spawn_core1(
        p.CORE1,
        unsafe { &mut *core::ptr::addr_of_mut!(CORE1_STACK) },
        move || {
            let executor1 = EXECUTOR1.init(Executor::new());
            executor1.run(|spawner| unwrap!(spawner.spawn(audio_task(store))));
        },
    );

    // —— Spawn tasks ————————————————————————————————————————————————————————

    unwrap!(spawner.spawn(usb_device_task(usb)));
    unwrap!(spawner.spawn(usb_midi_task(midi_class)));
    unwrap!(spawner.spawn(din_midi_task(midi_rx)));
    unwrap!(spawner.spawn(ui_task(ui, scanner, encoder)));

    info!("All tasks spawned");
}

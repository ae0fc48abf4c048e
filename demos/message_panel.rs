#![allow(missing_docs)]
#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

//! The message panel over WiFi.
//!
//! Joins the network given by `WIFI_SSID`/`WIFI_PASSWORD` at build time, then holds a TCP
//! connection to a line bridge at `BRIDGE_ADDR` (`a.b.c.d:port`). The bridge sends one
//! `"<topic> <payload>"` line per broker message (as `mosquitto_sub -v` prints them) and
//! receives the panel's publishes in the same form.
//!
//! ```text
//! WIFI_SSID=home WIFI_PASSWORD=secret BRIDGE_ADDR=192.168.1.10:1884 \
//!     cargo run --bin demo_message_panel --features wifi
//! ```

use core::{convert::Infallible, panic};

use cyw43::JoinOptions;
use cyw43_pio::{DEFAULT_CLOCK_DIVIDER, PioSpi};
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_net::tcp::TcpSocket;
use embassy_net::{Config, Ipv4Address, Stack, StackResources};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{DMA_CH0, PIO0, PIO1};
use embassy_rp::pio::{InterruptHandler, Pio};
use embassy_rp::pio_programs::ws2812::PioWs2812Program;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Duration, Instant, Timer};
use message_panel::{
    Error, Result,
    config::{LED_COUNT, LOGICAL_LAYOUT, PanelConfig},
    led_strip::pio_strip::PioLedStrip,
    led2d::surface::DisplaySurface,
    link::{LINE_CAPACITY, LineReader, LinkChannels, TransportEnd, format_line, parse_line},
    panel::MessagePanel,
};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

const WIFI_SSID: &str = match option_env!("WIFI_SSID") {
    Some(ssid) => ssid,
    None => "message-panel",
};
const WIFI_PASSWORD: &str = match option_env!("WIFI_PASSWORD") {
    Some(password) => password,
    None => "",
};
const BRIDGE_ADDR: &str = match option_env!("BRIDGE_ADDR") {
    Some(addr) => addr,
    None => "192.168.1.10:1884",
};
const RECONNECT_DELAY: Duration = Duration::from_secs(5);
const LINK_DEPTH: usize = 8;

type Transport = TransportEnd<'static, CriticalSectionRawMutex, LINK_DEPTH>;

static CHANNELS: LinkChannels<CriticalSectionRawMutex, LINK_DEPTH> = LinkChannels::new();

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
    PIO1_IRQ_0 => InterruptHandler<PIO1>;
});

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());
    let config = PanelConfig::new();

    // WiFi chip on PIO0
    let fw = cyw43_firmware::CYW43_43439A0;
    let clm = cyw43_firmware::CYW43_43439A0_CLM;
    let pwr = Output::new(p.PIN_23, Level::Low);
    let cs = Output::new(p.PIN_25, Level::High);
    let mut pio0 = Pio::new(p.PIO0, Irqs);
    let spi = PioSpi::new(
        &mut pio0.common,
        pio0.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio0.irq0,
        cs,
        p.PIN_24,
        p.PIN_29,
        p.DMA_CH0,
    );

    static STATE: StaticCell<cyw43::State> = StaticCell::new();
    let state = STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw).await;
    spawner.spawn(wifi_task(runner))?;

    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;

    static RESOURCES: StaticCell<StackResources<3>> = StaticCell::new();
    let (stack, net_runner) = embassy_net::new(
        net_device,
        Config::dhcpv4(Default::default()),
        RESOURCES.init(StackResources::new()),
        0x5d3a_91c7_0e42_b6f8,
    );
    spawner.spawn(net_task(net_runner))?;

    defmt::info!("Connecting to WiFi: {}", WIFI_SSID);
    while let Err(err) = control
        .join(WIFI_SSID, JoinOptions::new(WIFI_PASSWORD.as_bytes()))
        .await
    {
        defmt::warn!("{}", Error::WifiJoin(err.status));
        Timer::after_secs(1).await;
    }
    stack.wait_config_up().await;
    if let Some(ip) = stack.config_v4() {
        defmt::info!("IP Address: {}", ip.address);
    }

    // LED panel on PIO1
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO1, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let strip =
        PioLedStrip::<_, 0, LED_COUNT>::new(&mut common, sm0, p.DMA_CH1, p.PIN_26, &program);
    let surface = DisplaySurface::new(
        strip,
        &LOGICAL_LAYOUT,
        config.gamma,
        config.default_brightness,
    );

    let (link, transport) = CHANNELS.split();
    spawner.spawn(bridge_task(stack, transport))?;

    let panel = MessagePanel::new(config, surface, link, (), Instant::now());
    match panel.run().await {}
}

#[embassy_executor::task]
async fn wifi_task(
    runner: cyw43::Runner<'static, Output<'static>, PioSpi<'static, PIO0, 0, DMA_CH0>>,
) -> ! {
    runner.run().await
}

#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}

/// `BRIDGE_ADDR` as an IPv4 address and port.
fn bridge_endpoint() -> Option<(Ipv4Address, u16)> {
    let (ip, port) = BRIDGE_ADDR.split_once(':')?;
    Some((ip.parse().ok()?, port.parse().ok()?))
}

/// Keep a TCP session to the line bridge alive, reconnecting after any failure.
#[embassy_executor::task]
async fn bridge_task(stack: Stack<'static>, transport: Transport) -> ! {
    let Some(endpoint) = bridge_endpoint() else {
        defmt::panic!("BRIDGE_ADDR is not an address:port");
    };
    let mut rx_buffer = [0; 512];
    let mut tx_buffer = [0; 256];
    loop {
        let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);
        socket.set_timeout(Some(Duration::from_secs(60)));
        match socket.connect(endpoint).await {
            Ok(()) => {
                defmt::info!("bridge connected");
                let err = bridge_session(&mut socket, &transport).await;
                defmt::warn!("bridge session ended: {}", err);
            }
            Err(err) => defmt::warn!("bridge connect failed: {}", err),
        }
        socket.abort();
        Timer::after(RECONNECT_DELAY).await;
    }
}

/// Pump lines both ways until the connection fails.
async fn bridge_session(socket: &mut TcpSocket<'_>, transport: &Transport) -> Error {
    let mut reader = LineReader::<LINE_CAPACITY>::new();
    let mut chunk = [0u8; 64];
    loop {
        match select(socket.read(&mut chunk), transport.next_outbound()).await {
            Either::First(Ok(0) | Err(_)) => return Error::LinkDisconnected,
            Either::First(Ok(len)) => reader.push(&chunk[..len], |line| {
                if let Some((topic, payload)) = parse_line(line)
                    && let Err(err) = transport.deliver(topic, payload.as_bytes())
                {
                    defmt::warn!("dropping inbound message: {}", err);
                }
            }),
            Either::Second(message) => match format_line(&message.topic, &message.payload) {
                Ok(line) => {
                    if let Err(err) = write_line(socket, line.as_bytes()).await {
                        return err;
                    }
                }
                Err(err) => defmt::warn!("dropping outbound message: {}", err),
            },
        }
    }
}

async fn write_line(socket: &mut TcpSocket<'_>, mut bytes: &[u8]) -> Result<()> {
    while !bytes.is_empty() {
        match socket.write(bytes).await {
            Ok(0) | Err(_) => return Err(Error::Network),
            Ok(written) => bytes = &bytes[written..],
        }
    }
    Ok(())
}

#![allow(missing_docs)]
#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

//! Rainbow snake on the folded 32×16 panel, looping forever. No network needed.

use core::{convert::Infallible, panic};

use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::PIO1;
use embassy_rp::pio::{InterruptHandler, Pio};
use embassy_rp::pio_programs::ws2812::PioWs2812Program;
use embassy_time::Timer;
use message_panel::{
    Result,
    config::{LED_COUNT, LOGICAL_HEIGHT, LOGICAL_LAYOUT, LOGICAL_WIDTH, PanelConfig},
    led_strip::pio_strip::PioLedStrip,
    led2d::surface::DisplaySurface,
    rainbow_snake::{RainbowSnake, SNAKE_LENGTH},
};
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    PIO1_IRQ_0 => InterruptHandler<PIO1>;
});

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(_spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());
    let config = PanelConfig::new();

    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO1, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let strip =
        PioLedStrip::<_, 0, LED_COUNT>::new(&mut common, sm0, p.DMA_CH1, p.PIN_26, &program);
    let mut surface = DisplaySurface::new(
        strip,
        &LOGICAL_LAYOUT,
        config.gamma,
        config.default_brightness,
    );

    loop {
        let mut snake = RainbowSnake::<SNAKE_LENGTH, LOGICAL_WIDTH, LOGICAL_HEIGHT>::new();
        while snake.step(&mut surface) {
            surface.flush().await?;
            Timer::after(config.frame_delay).await;
        }
        defmt::info!("rainbow snake finished, restarting");
        Timer::after(config.tick_interval).await;
    }
}

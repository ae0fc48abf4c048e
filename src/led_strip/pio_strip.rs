//! [`LedStripDriver`] over embassy-rp's PIO WS2812 program.

use embassy_rp::Peri;
use embassy_rp::dma::Channel;
use embassy_rp::pio::{Common, Instance, PioPin, StateMachine};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};

use super::{Frame1d, LedStripDriver};
use crate::Result;

/// A WS2812 strip of `N` LEDs on one PIO state machine, fed by DMA.
///
/// ```rust,ignore
/// let Pio { mut common, sm0, .. } = Pio::new(p.PIO1, Irqs);
/// let program = PioWs2812Program::new(&mut common);
/// let strip = PioLedStrip::<_, 0, LED_COUNT>::new(&mut common, sm0, p.DMA_CH1, p.PIN_26, &program);
/// ```
pub struct PioLedStrip<'d, PIO: Instance, const SM: usize, const N: usize> {
    driver: PioWs2812<'d, PIO, SM, N>,
}

impl<'d, PIO: Instance, const SM: usize, const N: usize> PioLedStrip<'d, PIO, SM, N> {
    /// Load the strip onto `sm`, driving `pin`.
    #[must_use]
    pub fn new(
        common: &mut Common<'d, PIO>,
        sm: StateMachine<'d, PIO, SM>,
        dma: Peri<'d, impl Channel>,
        pin: Peri<'d, impl PioPin>,
        program: &PioWs2812Program<'d, PIO>,
    ) -> Self {
        Self {
            driver: PioWs2812::new(common, sm, dma, pin, program),
        }
    }
}

impl<PIO: Instance, const SM: usize, const N: usize> LedStripDriver<N>
    for PioLedStrip<'_, PIO, SM, N>
{
    async fn write_frame(&mut self, frame: &Frame1d<N>) -> Result<()> {
        self.driver.write(frame).await;
        Ok(())
    }
}

//! Screen rendering for the register.
//!
//! The renderer decides what goes where; the [`RenderSurface`] does the
//! drawing. Two screens exist:
//!
//! ```text
//! Normal                              ThankYou
//! +--------------------------------+  +--------------------------------+
//! | おうちレジ                      |  |                                |
//! | newest item name        ￥120 |  |           お買いあげ            |
//! | ------------------------------ |  |     ありがとうございます       |
//! | ...                            |  |                                |
//! | 計 ￥350               [CLEAR] |  |                                |
//! +--------------------------------+  +--------------------------------+
//! ```
//!
//! Layout is in pixels and derived from the surface size at draw time, so
//! the same renderer works on any panel.

use playreg_hardware::{Color, Font, Rect, RenderSurface};

use crate::cart::Cart;

const CAPTION: &str = "おうちレジ";
const CAPTION_X: i32 = 8;
const CAPTION_Y: i32 = 6;

const CLEAR_LABEL: &str = "CLEAR";
const CLEAR_BUTTON_W: i32 = 84;
const CLEAR_BUTTON_H: i32 = 34;
const CLEAR_BUTTON_MARGIN_RIGHT: i32 = 8;
const CLEAR_BUTTON_MARGIN_BOTTOM: i32 = 8;
const CLEAR_BUTTON_RADIUS: i32 = 6;
const CLEAR_BUTTON_HIT_INSET: i32 = 2;

const LIST_START_Y: i32 = 57;
const ITEM_ROW_HEIGHT: i32 = 36;
const ITEM_TEXT_OFFSET_Y: i32 = 3;
const ITEM_RULE_OFFSET_Y: i32 = 30;
const ITEM_MARGIN_X: i32 = 12;
const RULE_MARGIN_X: i32 = 8;

const TOTAL_LABEL: &str = "計";
const SUMMARY_MARGIN_X: i32 = 8;
const SUMMARY_MARGIN_BOTTOM: i32 = 4;
const SUMMARY_LABEL_RAISE: i32 = 5;

const THANK_YOU_LINES: [(&str, i32); 2] = [("お買いあげ", -24), ("ありがとうございます", 8)];

const ELLIPSIS: &str = "...";

/// Format a price as shown on screen.
pub fn price_text(amount: u64) -> String {
    format!("￥{}", amount)
}

/// `text` without its last character.
pub fn remove_last_char(text: &str) -> &str {
    match text.char_indices().next_back() {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// Shorten `text` with a trailing `...` so it fits in `max_width` pixels.
///
/// Characters are removed whole, never split. Text that already fits is
/// returned unchanged.
pub fn ellipsize<S>(surface: &S, text: &str, max_width: i32) -> String
where
    S: RenderSurface + ?Sized,
{
    if surface.text_width(text) <= max_width {
        return text.to_string();
    }

    let ellipsis_width = surface.text_width(ELLIPSIS);
    let mut shortened = text;
    while !shortened.is_empty() && surface.text_width(shortened) + ellipsis_width > max_width {
        shortened = remove_last_char(shortened);
    }

    format!("{}{}", shortened, ELLIPSIS)
}

/// Draws the normal and thank-you screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRenderer {
    visible_rows: usize,
}

impl ScreenRenderer {
    pub fn new(visible_rows: usize) -> Self {
        Self { visible_rows }
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    /// CLEAR button, anchored to the bottom-right corner.
    pub fn clear_button_rect<S>(&self, surface: &S) -> Rect
    where
        S: RenderSurface + ?Sized,
    {
        Rect::new(
            surface.width() - CLEAR_BUTTON_W - CLEAR_BUTTON_MARGIN_RIGHT,
            surface.height() - CLEAR_BUTTON_H - CLEAR_BUTTON_MARGIN_BOTTOM,
            CLEAR_BUTTON_W,
            CLEAR_BUTTON_H,
        )
    }

    /// Touch area of the CLEAR button, slightly inside the drawn button.
    pub fn clear_button_hit_rect<S>(&self, surface: &S) -> Rect
    where
        S: RenderSurface + ?Sized,
    {
        self.clear_button_rect(surface).inset(CLEAR_BUTTON_HIT_INSET)
    }

    pub fn render_normal<S>(&self, surface: &mut S, cart: &Cart)
    where
        S: RenderSurface + ?Sized,
    {
        surface.set_font(Font::Body);
        surface.set_text_color(Color::Black, Color::White);

        let width = surface.width();
        let height = surface.height();

        surface.fill_screen(Color::White);
        surface.draw_text(CAPTION_X, CAPTION_Y, CAPTION);

        self.draw_clear_button(surface);
        self.draw_item_rules(surface, width);
        self.draw_cart_items(surface, cart, width);
        self.draw_total(surface, cart.total(), height);
    }

    pub fn render_thank_you<S>(&self, surface: &mut S)
    where
        S: RenderSurface + ?Sized,
    {
        let center_y = surface.height() / 2;

        surface.fill_screen(Color::White);
        surface.set_font(Font::Body);
        surface.set_text_color(Color::Black, Color::White);
        for (line, offset) in THANK_YOU_LINES {
            draw_centered_text(surface, line, center_y + offset);
        }
    }

    fn draw_clear_button<S>(&self, surface: &mut S)
    where
        S: RenderSurface + ?Sized,
    {
        let rect = self.clear_button_rect(surface);
        surface.fill_round_rect(rect, CLEAR_BUTTON_RADIUS, Color::Red);

        surface.set_font(Font::Button);
        surface.set_text_color(Color::White, Color::Red);
        draw_centered_text_in_rect(surface, CLEAR_LABEL, rect);

        surface.set_font(Font::Body);
        surface.set_text_color(Color::Black, Color::White);
    }

    fn draw_item_rules<S>(&self, surface: &mut S, width: i32)
    where
        S: RenderSurface + ?Sized,
    {
        for row in 0..self.visible_rows {
            let y = row_y(row) + ITEM_RULE_OFFSET_Y;
            surface.draw_hline(RULE_MARGIN_X, y, width - RULE_MARGIN_X * 2, Color::DarkGrey);
        }
    }

    fn draw_cart_items<S>(&self, surface: &mut S, cart: &Cart, width: i32)
    where
        S: RenderSurface + ?Sized,
    {
        for (row, item) in cart.newest_first().take(self.visible_rows).enumerate() {
            let text_y = row_y(row) + ITEM_TEXT_OFFSET_Y;

            let price = price_text(u64::from(item.price));
            let price_x =
                (width - ITEM_MARGIN_X - surface.text_width(&price)).max(ITEM_MARGIN_X);
            let name_max_width = (price_x - ITEM_MARGIN_X * 2).max(0);
            let name = ellipsize(surface, &item.name, name_max_width);

            surface.draw_text(ITEM_MARGIN_X, text_y, &name);
            surface.draw_text(price_x, text_y, &price);
        }
    }

    /// Total line: the label in the body font, the amount in the larger
    /// summary font, bottoms roughly aligned.
    fn draw_total<S>(&self, surface: &mut S, total: u64, height: i32)
    where
        S: RenderSurface + ?Sized,
    {
        surface.set_font(Font::Summary);
        let amount_height = surface.font_height();
        let amount_y = (height - amount_height - SUMMARY_MARGIN_BOTTOM).max(0);

        surface.set_font(Font::Body);
        let label_height = surface.font_height();
        let label_y =
            (amount_y + (amount_height - label_height).max(0) - SUMMARY_LABEL_RAISE).max(0);
        surface.draw_text(SUMMARY_MARGIN_X, label_y, TOTAL_LABEL);
        let amount_x = SUMMARY_MARGIN_X + surface.text_width(TOTAL_LABEL) + SUMMARY_MARGIN_X;

        surface.set_font(Font::Summary);
        surface.draw_text(amount_x, amount_y, &price_text(total));
    }
}

impl Default for ScreenRenderer {
    fn default() -> Self {
        Self::new(playreg_core::constants::ITEM_VISIBLE_ROWS)
    }
}

fn row_y(row: usize) -> i32 {
    LIST_START_Y + i32::try_from(row).unwrap_or(i32::MAX / ITEM_ROW_HEIGHT) * ITEM_ROW_HEIGHT
}

fn draw_centered_text<S>(surface: &mut S, text: &str, y: i32)
where
    S: RenderSurface + ?Sized,
{
    let x = (surface.width() - surface.text_width(text)) / 2;
    surface.draw_text(x.max(0), y, text);
}

fn draw_centered_text_in_rect<S>(surface: &mut S, text: &str, rect: Rect)
where
    S: RenderSurface + ?Sized,
{
    let x = rect.x + (rect.w - surface.text_width(text)) / 2;
    let y = rect.y + (rect.h - surface.font_height()) / 2;
    surface.draw_text(x.max(0), y.max(0), text);
}

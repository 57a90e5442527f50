/// The single-page layout
///
/// Everything the user sees lives here: header with the theme toggle,
/// the input card, the conditional result panel, and the how-to card.
/// The toast overlay is stacked on top of the page when a notice is up.

use iced::widget::{
    button, column, container, horizontal_space, image, row, scrollable, slider, stack, text,
    text_input,
};
use iced::{Alignment, Element, Length};

use crate::ui::toast;
use crate::{Message, QrImage, QrStudio, MAX_RENDER_SIZE, MIN_RENDER_SIZE, SIZE_STEP};

/// Build the whole window content for the current state
pub fn view(app: &QrStudio) -> Element<'_, Message> {
    let mut page = column![header(app), input_card(app)]
        .spacing(24)
        .padding(32)
        .width(Length::Fill)
        .max_width(760);

    if let Some(qr) = &app.qr_image {
        page = page.push(result_panel(qr, app.render_size));
    }

    page = page.push(instructions());

    let content = scrollable(container(page).center_x(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill);

    let base = container(content).width(Length::Fill).height(Length::Fill);

    match &app.notice {
        // Float the notice over the page, top-center
        Some(notice) => stack![
            base,
            container(toast::view(notice))
                .center_x(Length::Fill)
                .padding(24),
        ]
        .into(),
        None => base.into(),
    }
}

/// Title block plus the theme toggle
fn header(app: &QrStudio) -> Element<'_, Message> {
    let toggle = button(text(app.theme_mode.toggled().label()).size(14))
        .on_press(Message::ThemeToggled)
        .style(button::secondary)
        .padding([8.0, 14.0]);

    row![
        column![
            text("QR Code Generator").size(34),
            text("Create beautiful QR codes for URLs, text, and more").size(16),
        ]
        .spacing(6),
        horizontal_space(),
        toggle,
    ]
    .align_y(Alignment::Center)
    .into()
}

/// Input field, size slider, and the generate/copy actions
fn input_card(app: &QrStudio) -> Element<'_, Message> {
    let field = text_input("https://example.com or any text", &app.input_text)
        .on_input(Message::InputChanged)
        .on_submit(Message::GeneratePressed)
        .padding(12)
        .size(16);

    let mut input_row = row![field].spacing(10).align_y(Alignment::Center);
    if !app.input_text.is_empty() {
        input_row = input_row.push(
            button(text("Clear").size(14))
                .on_press(Message::ClearPressed)
                .style(button::secondary)
                .padding([10.0, 16.0]),
        );
    }

    let size_block = column![
        text(format!("QR Code Size: {}px", app.render_size)).size(14),
        slider(
            MIN_RENDER_SIZE..=MAX_RENDER_SIZE,
            app.render_size,
            Message::SizeChanged,
        )
        .step(SIZE_STEP),
        row![
            text("Small").size(12),
            horizontal_space(),
            text("Medium").size(12),
            horizontal_space(),
            text("Large").size(12),
        ],
    ]
    .spacing(8);

    let generate_label = if app.generating {
        "Generating..."
    } else {
        "Generate QR Code"
    };
    let generate = button(text(generate_label).size(16))
        .on_press_maybe((!app.generating).then_some(Message::GeneratePressed))
        .padding([12.0, 24.0]);

    let mut actions = row![generate].spacing(10);
    if !app.input_text.is_empty() {
        actions = actions.push(
            button(text("Copy").size(16))
                .on_press(Message::CopyPressed)
                .style(button::secondary)
                .padding([12.0, 18.0]),
        );
    }

    container(
        column![
            text("Enter URL or Text").size(14),
            input_row,
            size_block,
            actions,
        ]
        .spacing(16),
    )
    .style(container::rounded_box)
    .padding(24)
    .width(Length::Fill)
    .into()
}

/// The generated image with its download/share actions
///
/// The image widget is sized to the live slider value: a stale image is
/// stretched rather than regenerated, and the new size only takes real
/// effect on the next generation.
fn result_panel(qr: &QrImage, render_size: u32) -> Element<'_, Message> {
    let edge = Length::Fixed(render_size as f32);

    let actions = row![
        button(text("Download").size(16))
            .on_press(Message::DownloadPressed)
            .style(button::success)
            .padding([12.0, 20.0]),
        button(text("Share").size(16))
            .on_press(Message::SharePressed)
            .padding([12.0, 20.0]),
    ]
    .spacing(10);

    container(
        column![
            text("Your QR Code").size(20),
            image(qr.handle.clone()).width(edge).height(edge),
            actions,
        ]
        .spacing(16)
        .align_x(Alignment::Center),
    )
    .style(container::rounded_box)
    .padding(24)
    .center_x(Length::Fill)
    .into()
}

/// Static how-to card at the bottom of the page
fn instructions() -> Element<'static, Message> {
    container(
        column![
            text("How to use").size(18),
            column![
                text("1. Enter any URL or text in the input field").size(14),
                text("2. Pick a size and press Generate QR Code").size(14),
                text("3. Download or share the image, or copy your text").size(14),
                text("4. Scan the result with any QR code reader to test it").size(14),
            ]
            .spacing(6),
        ]
        .spacing(12),
    )
    .style(container::rounded_box)
    .padding(24)
    .width(Length::Fill)
    .into()
}

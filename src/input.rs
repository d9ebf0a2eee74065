use winit::{
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::{Key, NamedKey},
};

/// What the window renderer should do in response to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAction {
    Continue,
    Resize(PhysicalSize<u32>),
    Quit,
}

pub fn handle_window_event(event: &WindowEvent) -> WindowAction {
    match event {
        WindowEvent::CloseRequested => {
            log::info!("Window close requested");
            WindowAction::Quit
        }
        WindowEvent::KeyboardInput {
            event: KeyEvent {
                logical_key: Key::Named(NamedKey::Escape),
                state: ElementState::Pressed,
                ..
            },
            ..
        } => {
            log::info!("Escape pressed");
            WindowAction::Quit
        }
        WindowEvent::Resized(new_size) => WindowAction::Resize(*new_size),
        _ => WindowAction::Continue,
    }
}

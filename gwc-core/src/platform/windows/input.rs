//! Key event injection via Win32 `SendInput`.
//!
//! Events go to whichever window currently holds focus; the press state
//! machine in [`crate::window`] is responsible for verifying focus first.

use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS, KEYEVENTF_KEYUP,
    VIRTUAL_KEY, VK_DOWN, VK_LEFT, VK_RETURN, VK_RIGHT, VK_UP, VK_X, VK_Z,
};

use crate::errors::{GwcError, Result};
use crate::keys::Key;

/// Pre-computed size of `INPUT` for `SendInput` calls.
const INPUT_SIZE: i32 = std::mem::size_of::<INPUT>() as i32;

fn virtual_key(key: Key) -> VIRTUAL_KEY {
    match key {
        Key::Z => VK_Z,
        Key::X => VK_X,
        Key::Up => VK_UP,
        Key::Down => VK_DOWN,
        Key::Left => VK_LEFT,
        Key::Right => VK_RIGHT,
        Key::Enter => VK_RETURN,
    }
}

fn key_input(vk: VIRTUAL_KEY, key_up: bool) -> INPUT {
    let flags = if key_up {
        KEYEVENTF_KEYUP
    } else {
        KEYBD_EVENT_FLAGS(0)
    };

    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: vk,
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

/// Inject one key transition (down or up) for `key`.
pub(super) fn send_key(key: Key, key_up: bool) -> Result<()> {
    let input = key_input(virtual_key(key), key_up);
    let injected = unsafe { SendInput(&[input], INPUT_SIZE) };
    if injected != 1 {
        return Err(GwcError::os_call(
            "SendInput",
            format!("event for '{key}' was blocked"),
        ));
    }
    Ok(())
}

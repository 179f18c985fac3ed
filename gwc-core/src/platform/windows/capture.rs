//! Per-window pixel capture via GDI `BitBlt`.
//!
//! The window's device context is blitted into an off-screen compatible
//! bitmap, then read out as a top-down 32-bit DIB (negative height puts
//! row 0 at the visual top).  This is the most leak-prone operation in
//! the crate: the DC, the memory DC, the bitmap, and the selected-object
//! handle must each be released on every exit path, so the pixel work
//! happens in an inner closure and cleanup runs unconditionally after it.

use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC, GetDIBits,
    ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS, SRCCOPY,
};

use crate::errors::{GwcError, Result};
use crate::frame::Frame;
use crate::geometry::Rect;

/// Capture the live pixels of `handle` as a top-down RGBA frame.
///
/// `rect` is the window's current bounding box, queried by the caller at
/// the same instant so the frame dimensions match the reported geometry.
pub(super) fn capture_window(handle: HWND, rect: Rect) -> Result<Frame> {
    let width = rect.width();
    let height = rect.height();
    if width <= 0 || height <= 0 {
        return Err(GwcError::os_call(
            "GetWindowRect",
            format!("window has degenerate size {width}x{height}"),
        ));
    }

    unsafe {
        let window_dc = GetDC(handle);
        if window_dc.is_invalid() {
            return Err(GwcError::InvalidHandle(handle.0 as isize));
        }

        let result = (|| -> Result<Frame> {
            let mem_dc = CreateCompatibleDC(window_dc);
            if mem_dc.is_invalid() {
                return Err(GwcError::os_call("CreateCompatibleDC", "returned null DC"));
            }
            let bitmap = CreateCompatibleBitmap(window_dc, width, height);
            if bitmap.is_invalid() {
                let _ = DeleteDC(mem_dc);
                return Err(GwcError::os_call(
                    "CreateCompatibleBitmap",
                    "returned null bitmap",
                ));
            }

            let old_bitmap = SelectObject(mem_dc, bitmap);

            // Blit the window's live pixels into the memory DC.
            BitBlt(mem_dc, 0, 0, width, height, window_dc, 0, 0, SRCCOPY).map_err(|e| {
                SelectObject(mem_dc, old_bitmap);
                let _ = DeleteObject(bitmap);
                let _ = DeleteDC(mem_dc);
                GwcError::os_call("BitBlt", e)
            })?;

            let pixel_count = (width * height) as usize;
            let mut pixels = vec![0u8; pixel_count * 4];

            let bmi = BITMAPINFO {
                bmiHeader: BITMAPINFOHEADER {
                    biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                    biWidth: width,
                    // Negative height = top-down DIB (row 0 at the top).
                    biHeight: -height,
                    biPlanes: 1,
                    biBitCount: 32,
                    biCompression: BI_RGB.0,
                    biSizeImage: 0,
                    biXPelsPerMeter: 0,
                    biYPelsPerMeter: 0,
                    biClrUsed: 0,
                    biClrImportant: 0,
                },
                bmiColors: [Default::default()],
            };

            let lines = GetDIBits(
                mem_dc,
                bitmap,
                0,
                height as u32,
                Some(pixels.as_mut_ptr() as *mut _),
                &bmi as *const _ as *mut _,
                DIB_RGB_COLORS,
            );

            SelectObject(mem_dc, old_bitmap);
            let _ = DeleteObject(bitmap);
            let _ = DeleteDC(mem_dc);

            if lines == 0 {
                return Err(GwcError::os_call("GetDIBits", "no scan lines copied"));
            }

            // GDI hands back BGRA with alpha 0; swap to RGBA, force opaque.
            for px in pixels.chunks_exact_mut(4) {
                px.swap(0, 2);
                px[3] = 255;
            }

            Frame::from_rgba(width as u32, height as u32, pixels)
        })();

        ReleaseDC(handle, window_dc);
        result
    }
}

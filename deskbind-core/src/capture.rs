//! Screen and window capture via GDI.
//!
//! Four targets: the full primary screen, a window, a window's client area,
//! and a sub-region of a window.  Window and client capture go through
//! `PrintWindow`, which asks the window to render into our context and so
//! picks up occluded or composited content; screen capture copies directly
//! from the screen device context with `BitBlt`.
//!
//! All pixel output is 32-bit top-down BGRA with `stride == width * 4`.
//! Device contexts and bitmaps are held in RAII guards so every exit path,
//! success or failure, releases them.

use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC, GetDIBits,
    ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS, HBITMAP, HDC,
    HGDIOBJ, SRCCOPY,
};
use windows::Win32::Storage::Xps::{PrintWindow, PRINT_WINDOW_FLAGS, PW_CLIENTONLY};
use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

use crate::errors::{AutomationError, Result};
use crate::window::{ensure_valid, get_client_rect, get_window_rect, WindowRect};

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Raw BGRA pixel data for one captured frame.
///
/// Pixels are row-major, left-to-right, top-to-bottom.  `bits_per_pixel`
/// is always 32 and `stride` is always `width * 4`.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw pixel bytes; length == `stride * height`.
    pub data: Vec<u8>,
    pub width: i32,
    pub height: i32,
    pub bits_per_pixel: i32,
    pub stride: i32,
}

impl ImageData {
    /// Allocate a zeroed frame of the given dimensions.
    fn new(width: i32, height: i32) -> Self {
        let stride = width * 4;
        ImageData {
            data: vec![0u8; (stride * height) as usize],
            width,
            height,
            bits_per_pixel: 32,
            stride,
        }
    }
}

// ---------------------------------------------------------------------------
// RAII guards for GDI handles
// ---------------------------------------------------------------------------

/// The screen device context, released on drop.
struct ScreenDc(HDC);

impl ScreenDc {
    fn get() -> Result<Self> {
        let dc = unsafe { GetDC(HWND::default()) };
        if dc.is_invalid() {
            return Err(AutomationError::CaptureFailed("GetDC(NULL) failed".into()));
        }
        Ok(ScreenDc(dc))
    }
}

impl Drop for ScreenDc {
    fn drop(&mut self) {
        unsafe { ReleaseDC(HWND::default(), self.0) };
    }
}

/// A memory device context compatible with a source DC, deleted on drop.
struct MemoryDc(HDC);

impl MemoryDc {
    fn compatible_with(source: HDC) -> Result<Self> {
        let dc = unsafe { CreateCompatibleDC(source) };
        if dc.is_invalid() {
            return Err(AutomationError::CaptureFailed(
                "CreateCompatibleDC failed".into(),
            ));
        }
        Ok(MemoryDc(dc))
    }
}

impl Drop for MemoryDc {
    fn drop(&mut self) {
        let _ = unsafe { DeleteDC(self.0) };
    }
}

/// A GDI bitmap, deleted on drop.
struct GdiBitmap(HBITMAP);

impl GdiBitmap {
    fn compatible_with(source: HDC, width: i32, height: i32) -> Result<Self> {
        let bitmap = unsafe { CreateCompatibleBitmap(source, width, height) };
        if bitmap.is_invalid() {
            return Err(AutomationError::CaptureFailed(
                "CreateCompatibleBitmap failed".into(),
            ));
        }
        Ok(GdiBitmap(bitmap))
    }
}

impl Drop for GdiBitmap {
    fn drop(&mut self) {
        let _ = unsafe { DeleteObject(self.0) };
    }
}

/// Keeps a bitmap selected into a memory DC, restoring the previous
/// selection on drop so the DC can be deleted cleanly.
struct Selection<'a> {
    dc: &'a MemoryDc,
    previous: HGDIOBJ,
}

impl<'a> Selection<'a> {
    fn select(dc: &'a MemoryDc, bitmap: &GdiBitmap) -> Self {
        let previous = unsafe { SelectObject(dc.0, bitmap.0) };
        Selection { dc, previous }
    }
}

impl Drop for Selection<'_> {
    fn drop(&mut self) {
        unsafe { SelectObject(self.dc.0, self.previous) };
    }
}

// ---------------------------------------------------------------------------
// Pixel extraction
// ---------------------------------------------------------------------------

/// Read a bitmap's pixels into an [`ImageData`] as top-down 32-bit BGRA.
fn extract_image_data(dc: HDC, bitmap: HBITMAP, width: i32, height: i32) -> Result<ImageData> {
    let mut image = ImageData::new(width, height);

    let bmi = BITMAPINFO {
        bmiHeader: BITMAPINFOHEADER {
            biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: width,
            // Negative height = top-down rows.
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

    let lines = unsafe {
        GetDIBits(
            dc,
            bitmap,
            0,
            height as u32,
            Some(image.data.as_mut_ptr() as *mut _),
            &bmi as *const _ as *mut _,
            DIB_RGB_COLORS,
        )
    };

    if lines == 0 {
        return Err(AutomationError::CaptureFailed("GetDIBits failed".into()));
    }

    Ok(image)
}

// ---------------------------------------------------------------------------
// Capture primitives
// ---------------------------------------------------------------------------

/// Ask a window to render itself into a fresh bitmap via `PrintWindow`.
fn capture_using_print_window(
    hwnd: HWND,
    width: i32,
    height: i32,
    flags: PRINT_WINDOW_FLAGS,
) -> Result<ImageData> {
    let screen_dc = ScreenDc::get()?;
    let mem_dc = MemoryDc::compatible_with(screen_dc.0)?;
    let bitmap = GdiBitmap::compatible_with(screen_dc.0, width, height)?;
    let _selected = Selection::select(&mem_dc, &bitmap);

    if !unsafe { PrintWindow(hwnd, mem_dc.0, flags) }.as_bool() {
        return Err(AutomationError::CaptureFailed("PrintWindow failed".into()));
    }

    extract_image_data(mem_dc.0, bitmap.0, width, height)
}

/// Copy a rectangle out of a source DC with `BitBlt`.
fn capture_using_bitblt(source: HDC, x: i32, y: i32, width: i32, height: i32) -> Result<ImageData> {
    let mem_dc = MemoryDc::compatible_with(source)?;
    let bitmap = GdiBitmap::compatible_with(source, width, height)?;
    let _selected = Selection::select(&mem_dc, &bitmap);

    unsafe { BitBlt(mem_dc.0, 0, 0, width, height, source, x, y, SRCCOPY) }
        .map_err(|e| AutomationError::CaptureFailed(format!("BitBlt failed: {e}")))?;

    extract_image_data(mem_dc.0, bitmap.0, width, height)
}

/// Check that a requested region lies inside the window's bounds.
fn region_within(window: &WindowRect, x: i32, y: i32, width: i32, height: i32) -> bool {
    x + width <= window.width() && y + height <= window.height()
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Capture the full primary screen.
pub fn capture_screen() -> Result<ImageData> {
    let width = unsafe { GetSystemMetrics(SM_CXSCREEN) };
    let height = unsafe { GetSystemMetrics(SM_CYSCREEN) };

    if width <= 0 || height <= 0 {
        return Err(AutomationError::CaptureFailed(format!(
            "GetSystemMetrics returned invalid screen size: {width}x{height}"
        )));
    }

    let screen_dc = ScreenDc::get()?;
    capture_using_bitblt(screen_dc.0, 0, 0, width, height)
}

/// Capture a whole window, including its frame.
pub fn capture_window(handle: isize) -> Result<ImageData> {
    let hwnd = ensure_valid(handle)?;

    let rect = get_window_rect(handle)?;
    let (width, height) = (rect.width(), rect.height());
    if width <= 0 || height <= 0 {
        return Err(AutomationError::InvalidParameter(format!(
            "window has invalid dimensions: {width}x{height}"
        )));
    }

    capture_using_print_window(hwnd, width, height, PRINT_WINDOW_FLAGS(0))
}

/// Capture a window's client area only.
pub fn capture_window_client(handle: isize) -> Result<ImageData> {
    let hwnd = ensure_valid(handle)?;

    let rect = get_client_rect(handle)?;
    let (width, height) = (rect.width(), rect.height());
    if width <= 0 || height <= 0 {
        return Err(AutomationError::InvalidParameter(format!(
            "client area has invalid dimensions: {width}x{height}"
        )));
    }

    capture_using_print_window(hwnd, width, height, PW_CLIENTONLY)
}

/// Capture a sub-region of a window, in window coordinates.
///
/// The region must lie entirely within the window bounds, otherwise
/// [`AutomationError::InvalidParameter`] is returned.  On success the
/// result holds exactly `width * height * 4` bytes.
pub fn capture_region(handle: isize, x: i32, y: i32, width: i32, height: i32) -> Result<ImageData> {
    let hwnd = ensure_valid(handle)?;

    if width <= 0 || height <= 0 {
        return Err(AutomationError::InvalidParameter(format!(
            "invalid region dimensions: {width}x{height}"
        )));
    }

    let window_rect = get_window_rect(handle)?;
    if !region_within(&window_rect, x, y, width, height) {
        return Err(AutomationError::InvalidParameter(
            "region extends beyond window bounds".into(),
        ));
    }

    let full = capture_using_print_window(
        hwnd,
        window_rect.width(),
        window_rect.height(),
        PRINT_WINDOW_FLAGS(0),
    )?;

    // Crop row-by-row out of the full-window frame.
    let mut region = ImageData::new(width, height);
    let row_bytes = (width * 4) as usize;
    for row in 0..height {
        let src_start = ((y + row) * full.stride + x * 4) as usize;
        let dst_start = (row * region.stride) as usize;
        if let Some(src) = full.data.get(src_start..src_start + row_bytes) {
            region.data[dst_start..dst_start + row_bytes].copy_from_slice(src);
        }
    }

    Ok(region)
}

/// Encode a captured frame as an in-memory PNG.
pub fn to_png(image: &ImageData) -> Result<Vec<u8>> {
    // BGRA -> RGBA for the `image` crate.
    let rgba: Vec<u8> = image
        .data
        .chunks_exact(4)
        .flat_map(|px| [px[2], px[1], px[0], px[3]])
        .collect();

    let frame = image::RgbaImage::from_raw(image.width as u32, image.height as u32, rgba)
        .ok_or_else(|| {
            AutomationError::MemoryAllocationFailed(
                "pixel buffer does not match image dimensions".into(),
            )
        })?;

    let mut buf: Vec<u8> = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buf);
    frame
        .write_to(&mut cursor, image::ImageFormat::Png)
        .map_err(|e| AutomationError::CaptureFailed(format!("PNG encoding failed: {e}")))?;

    Ok(buf)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AutomationError;

    fn rect(width: i32, height: i32) -> WindowRect {
        WindowRect {
            left: 100,
            top: 100,
            right: 100 + width,
            bottom: 100 + height,
        }
    }

    #[test]
    fn test_image_data_layout() {
        let img = ImageData::new(640, 480);
        assert_eq!(img.bits_per_pixel, 32);
        assert_eq!(img.stride, 640 * 4);
        assert_eq!(img.data.len(), 640 * 480 * 4);
    }

    #[test]
    fn test_region_bounds_check() {
        let w = rect(800, 600);
        assert!(region_within(&w, 0, 0, 800, 600));
        assert!(region_within(&w, 100, 100, 700, 500));
        assert!(!region_within(&w, 1, 0, 800, 600));
        assert!(!region_within(&w, 0, 101, 800, 500));
        assert!(!region_within(&w, 0, 0, 801, 1));
    }

    #[test]
    fn test_capture_rejects_dead_handle() {
        assert!(matches!(
            capture_window(0),
            Err(AutomationError::InvalidHandle)
        ));
        assert!(matches!(
            capture_window_client(0),
            Err(AutomationError::InvalidHandle)
        ));
        assert!(matches!(
            capture_region(0, 0, 0, 10, 10),
            Err(AutomationError::InvalidHandle)
        ));
    }

    #[test]
    fn test_png_round_trip_header() {
        // 2x2 opaque red frame in BGRA.
        let image = ImageData {
            data: vec![
                0, 0, 255, 255, 0, 0, 255, 255, //
                0, 0, 255, 255, 0, 0, 255, 255,
            ],
            width: 2,
            height: 2,
            bits_per_pixel: 32,
            stride: 8,
        };
        let png = to_png(&image).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_png_rejects_short_buffer() {
        let image = ImageData {
            data: vec![0u8; 4],
            width: 2,
            height: 2,
            bits_per_pixel: 32,
            stride: 8,
        };
        assert!(matches!(
            to_png(&image),
            Err(AutomationError::MemoryAllocationFailed(_))
        ));
    }
}

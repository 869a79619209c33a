/// Read text from an FLTK TextBuffer without leaking the C-allocated copy.
///
/// fltk-rs's `TextBuffer::text()` goes through FLTK's `Fl_Text_Buffer_text()`,
/// which hands back a `malloc()`'d C string. The Rust wrapper copies it into a
/// String but never frees the C pointer, so every call leaks the whole buffer.
/// This helper does the FFI call itself and frees the allocation.
pub fn buffer_text_no_leak(buf: &fltk::text::TextBuffer) -> String {
    unsafe extern "C" {
        fn Fl_Text_Buffer_text(buf: *mut std::ffi::c_void) -> *mut std::ffi::c_char;
        fn free(ptr: *mut std::ffi::c_void);
    }

    // SAFETY: `buf.as_ptr()` is the live FLTK buffer pointer (valid while `buf`
    // exists, and FLTK is initialized before any buffer is created).
    // `Fl_Text_Buffer_text` returns a malloc'd, null-terminated C string, or
    // null for an empty buffer. We copy it into a String (lossy on invalid
    // UTF-8) and then `free()` the allocation, matching FLTK's malloc.
    unsafe {
        let inner = buf.as_ptr() as *mut std::ffi::c_void;
        let ptr = Fl_Text_Buffer_text(inner);
        if ptr.is_null() {
            return String::new();
        }
        let cstr = std::ffi::CStr::from_ptr(ptr);
        let result = cstr.to_string_lossy().into_owned();
        free(ptr as *mut std::ffi::c_void);
        result
    }
}

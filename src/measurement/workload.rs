//! Workload strategies executed once per measured iteration.
//!
//! Each strategy takes the running accumulator and returns its update, so
//! the compiler has to treat the work as observable. The accumulator has no
//! other role; nothing branches on it.

use crate::error::HarnessError;

/// Golden-ratio constant mixed into the baseline arithmetic.
const MIX: u64 = 0x9e37_79b9_7f4a_7c15;

/// One unit of work timed by the sampling loop.
pub trait Workload {
    /// Short name for logging and reports.
    fn name(&self) -> &'static str;

    /// Perform exactly one unit of work for `iteration`, folding the result
    /// into `acc`.
    fn execute(&mut self, iteration: usize, acc: u64) -> u64;
}

#[inline(always)]
fn mix(acc: u64) -> u64 {
    acc.wrapping_add((acc << 1) ^ MIX)
}

/// Pure user-space arithmetic on the accumulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Baseline;

impl Workload for Baseline {
    fn name(&self) -> &'static str {
        "baseline"
    }

    #[inline(always)]
    fn execute(&mut self, _iteration: usize, acc: u64) -> u64 {
        mix(acc)
    }
}

/// Baseline arithmetic plus one trivial kernel-boundary crossing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Syscall;

impl Workload for Syscall {
    fn name(&self) -> &'static str {
        "syscall"
    }

    #[inline(always)]
    fn execute(&mut self, _iteration: usize, acc: u64) -> u64 {
        mix(acc).wrapping_add(process_id())
    }
}

#[cfg(unix)]
#[inline(always)]
fn process_id() -> u64 {
    // glibc stopped caching getpid in 2.25, so this enters the kernel.
    unsafe { libc::getpid() as u64 }
}

#[cfg(not(unix))]
#[inline(always)]
fn process_id() -> u64 {
    u64::from(std::process::id())
}

/// Read-modify-write of the first byte of page `iteration % pages`.
///
/// The first pass over the region takes a fault on every page; later
/// passes hit resident pages.
#[derive(Debug)]
pub struct PageFault {
    region: PageRegion,
}

impl PageFault {
    /// Reserve `pages` untouched pages for the workload.
    pub fn reserve(pages: usize) -> Result<Self, HarnessError> {
        Ok(Self {
            region: PageRegion::reserve(pages)?,
        })
    }

    /// The backing region.
    pub fn region(&self) -> &PageRegion {
        &self.region
    }
}

impl Workload for PageFault {
    fn name(&self) -> &'static str {
        "pagefault"
    }

    #[inline(always)]
    fn execute(&mut self, iteration: usize, acc: u64) -> u64 {
        let byte = self.region.touch(iteration % self.region.pages());
        acc.wrapping_add(u64::from(byte))
    }
}

/// Anonymous private mapping that is reserved but never pre-touched.
///
/// Unmapped on drop.
#[derive(Debug)]
#[cfg_attr(not(unix), allow(dead_code))]
pub struct PageRegion {
    ptr: *mut u8,
    pages: usize,
    page_size: usize,
}

impl PageRegion {
    /// Reserve `pages` pages of anonymous memory without touching them.
    #[cfg(unix)]
    pub fn reserve(pages: usize) -> Result<Self, HarnessError> {
        if pages == 0 {
            return Err(HarnessError::EmptyRegion);
        }

        let page_size = page_size();
        let bytes = pages
            .checked_mul(page_size)
            .ok_or_else(|| HarnessError::Reservation {
                bytes: usize::MAX,
                source: std::io::Error::from(std::io::ErrorKind::OutOfMemory),
            })?;

        let ptr = unsafe {
            libc::mmap(
                std::ptr::null_mut(),
                bytes,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANON,
                -1,
                0,
            )
        };
        if ptr == libc::MAP_FAILED {
            return Err(HarnessError::Reservation {
                bytes,
                source: std::io::Error::last_os_error(),
            });
        }

        advise(ptr, bytes);

        tracing::debug!(pages, page_size, bytes, "reserved page-fault region");

        Ok(Self {
            ptr: ptr.cast::<u8>(),
            pages,
            page_size,
        })
    }

    /// Reserve `pages` pages of anonymous memory without touching them.
    #[cfg(not(unix))]
    pub fn reserve(pages: usize) -> Result<Self, HarnessError> {
        if pages == 0 {
            return Err(HarnessError::EmptyRegion);
        }
        Err(HarnessError::UnsupportedPlatform)
    }

    /// Number of pages in the region.
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Page size in bytes.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Total mapped bytes.
    pub fn len(&self) -> usize {
        self.pages * self.page_size
    }

    /// Whether the region maps nothing. Always false for a reserved region.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Increment the first byte of `page` and return the new value.
    #[inline(always)]
    fn touch(&mut self, page: usize) -> u8 {
        debug_assert!(page < self.pages);
        // SAFETY: page < pages, so the offset lies inside the mapping, which
        // is readable and writable for the lifetime of self.
        unsafe {
            let p = self.ptr.add(page * self.page_size);
            let value = std::ptr::read_volatile(p).wrapping_add(1);
            std::ptr::write_volatile(p, value);
            value
        }
    }

    /// Read the first byte of `page`. Touches the page.
    pub fn first_byte(&self, page: usize) -> Option<u8> {
        if page >= self.pages {
            return None;
        }
        // SAFETY: bounds checked above.
        Some(unsafe { std::ptr::read_volatile(self.ptr.add(page * self.page_size)) })
    }
}

#[cfg(unix)]
impl Drop for PageRegion {
    fn drop(&mut self) {
        // SAFETY: ptr/len describe the mapping created by reserve.
        unsafe {
            libc::munmap(self.ptr.cast::<libc::c_void>(), self.len());
        }
    }
}

/// Best-effort advice; failures leave the default policy in place.
#[cfg(target_os = "linux")]
fn advise(ptr: *mut libc::c_void, bytes: usize) {
    unsafe {
        libc::madvise(ptr, bytes, libc::MADV_SEQUENTIAL);
        // Keep every base page faulting on its own first touch.
        libc::madvise(ptr, bytes, libc::MADV_NOHUGEPAGE);
    }
}

#[cfg(all(unix, not(target_os = "linux")))]
fn advise(ptr: *mut libc::c_void, bytes: usize) {
    unsafe {
        libc::madvise(ptr, bytes, libc::MADV_SEQUENTIAL);
    }
}

#[cfg(unix)]
fn page_size() -> usize {
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if size > 0 {
        size as usize
    } else {
        4096
    }
}

use std::ops::{Deref, DerefMut};

use crate::{ImaginaryFirst, Quaternion, RealFirst, XYZW};

/// Named fields of a quaternion stored real part first.
#[repr(C)]
pub struct WXYZ<E> {
    pub w: E,
    pub x: E,
    pub y: E,
    pub z: E,
    _priv: (), // prevent external construction
}

macro_rules! field_view {
    ($($order:ident => $view:ident),+) => {
        $(
            impl<E> Deref for Quaternion<[E; 4], $order> {
                type Target = $view<E>;

                #[inline]
                fn deref(&self) -> &Self::Target {
                    // SAFETY: `$view` is `repr(C)` with 4 fields of type `E` followed by a
                    // zero-sized field, so it has the same layout as `[E; 4]`. The field order
                    // matches the storage order of `$order`.
                    unsafe { &*(self.storage.as_ptr() as *const $view<E>) }
                }
            }

            impl<E> DerefMut for Quaternion<[E; 4], $order> {
                #[inline]
                fn deref_mut(&mut self) -> &mut Self::Target {
                    // SAFETY: see `deref`.
                    unsafe { &mut *(self.storage.as_mut_ptr() as *mut $view<E>) }
                }
            }
        )+
    };
}

field_view!(ImaginaryFirst => XYZW, RealFirst => WXYZ);

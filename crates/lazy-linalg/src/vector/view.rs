use std::ops::{Deref, DerefMut};

use crate::Vector;

#[repr(C)]
pub struct XY<E> {
    pub x: E,
    pub y: E,
    _priv: (), // prevent external construction
}

#[repr(C)]
pub struct XYZ<E> {
    pub x: E,
    pub y: E,
    pub z: E,
    _priv: (), // prevent external construction
}

#[repr(C)]
pub struct XYZW<E> {
    pub x: E,
    pub y: E,
    pub z: E,
    pub w: E,
    _priv: (), // prevent external construction
}

macro_rules! field_view {
    ($($n:literal => $view:ident),+) => {
        $(
            impl<E> Deref for Vector<[E; $n]> {
                type Target = $view<E>;

                #[inline]
                fn deref(&self) -> &Self::Target {
                    // SAFETY: `$view` is `repr(C)` with `$n` fields of type `E` followed by a
                    // zero-sized field, so it has the same layout as `[E; $n]`.
                    unsafe { &*(self.0.as_ptr() as *const $view<E>) }
                }
            }

            impl<E> DerefMut for Vector<[E; $n]> {
                #[inline]
                fn deref_mut(&mut self) -> &mut Self::Target {
                    // SAFETY: see `deref`.
                    unsafe { &mut *(self.0.as_mut_ptr() as *mut $view<E>) }
                }
            }
        )+
    };
}

field_view!(2 => XY, 3 => XYZ, 4 => XYZW);

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn field_access() {
        let mut v = vec3(1, 2, 3);
        assert_eq!((v.x, v.y, v.z), (1, 2, 3));
        v.y = 20;
        assert_eq!(v, vec3(1, 20, 3));

        let w = vec4(1.0, 2.0, 3.0, 4.0);
        assert_eq!(w.w, 4.0);
    }
}

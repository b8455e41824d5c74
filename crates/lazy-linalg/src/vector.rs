use std::{array, fmt};

use itertools::Itertools;

use crate::{
    assign::Writable,
    dim::Dim,
    error::{Result, SizeError},
    expr::{Expr, IntoExpr, UnaryOp, VectorXpr},
    op,
    shape::VectorShape,
    storage::{StorageKind, VectorStorage, VectorStorageMut},
    traits::{Scalar, Sqrt, Zero},
};

mod ops;
mod view;

pub use view::*;

/// A vector with fixed-size, inline storage.
pub type FixedVector<E, const N: usize> = Vector<[E; N]>;
/// A vector with heap storage whose length is only known at runtime.
pub type DynVector<E> = Vector<Vec<E>>;
/// A vector backed by a caller-owned buffer.
pub type ExternalVector<'a, E> = Vector<&'a mut [E]>;
/// A vector backed by a caller-owned array of known length.
pub type ExternalFixedVector<'a, E, const N: usize> = Vector<&'a mut [E; N]>;
/// A read-only vector backed by a caller-owned buffer.
pub type VectorView<'a, E> = Vector<&'a [E]>;

/// A 2-dimensional vector.
pub type Vec2<E> = Vector<[E; 2]>;
/// A 3-dimensional vector.
pub type Vec3<E> = Vector<[E; 3]>;
/// A 4-dimensional vector.
pub type Vec4<E> = Vector<[E; 4]>;

/// A column vector with elements stored in `S`.
///
/// The storage type decides the vector's [`StorageKind`]:
///
/// - arrays (`[E; N]`, see [`FixedVector`]) have a length that is part of the type,
/// - [`Vec`] (see [`DynVector`]) is resized when a value of a different length is assigned,
/// - mutable slices and array references (see [`ExternalVector`] and
///   [`ExternalFixedVector`]) write into a buffer owned by the caller, and never resize,
/// - shared slices (see [`VectorView`]) are read-only.
///
/// All of them can be combined with each other in expressions.
///
/// # Construction
///
/// - The freestanding [`vec2`], [`vec3`] and [`vec4`] functions directly create vectors from
///   provided values.
/// - [`Vector::new`] wraps any storage value.
/// - Fixed vectors can be created with [`Vector::zeros`], [`Vector::splat`] and
///   [`Vector::from_fn`].
/// - Dynamic vectors can be created with [`DynVector::from_vec`] and [`DynVector::zeros`].
/// - External vectors are created with [`Vector::external`], [`Vector::external_fixed`] and
///   [`Vector::view`].
///
/// # Element Access
///
/// - The [`Index`] and [`IndexMut`] impls can be used just like on slices.
/// - For fixed vectors with 2 to 4 dimensions, elements can be accessed as fields `x`, `y`, `z`
///   and `w`.
/// - [`Vector::as_slice`] and [`Vector::get`] work for every storage kind.
/// - [`bytemuck::Zeroable`] and [`bytemuck::Pod`] are implemented for fixed vectors.
///
/// [`Index`]: std::ops::Index
/// [`IndexMut`]: std::ops::IndexMut
#[derive(Clone, Copy, Default, Hash)]
#[repr(transparent)]
pub struct Vector<S>(S);

unsafe impl<E: bytemuck::Zeroable, const N: usize> bytemuck::Zeroable for Vector<[E; N]> {}
unsafe impl<E: bytemuck::Pod, const N: usize> bytemuck::Pod for Vector<[E; N]> {}

/// Creates a 2-dimensional vector.
#[inline]
pub const fn vec2<E>(x: E, y: E) -> Vec2<E> {
    Vector([x, y])
}

/// Creates a 3-dimensional vector.
#[inline]
pub const fn vec3<E>(x: E, y: E, z: E) -> Vec3<E> {
    Vector([x, y, z])
}

/// Creates a 4-dimensional vector.
#[inline]
pub const fn vec4<E>(x: E, y: E, z: E, w: E) -> Vec4<E> {
    Vector([x, y, z, w])
}

impl<S> Vector<S> {
    /// Wraps a storage value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lazy_linalg::*;
    /// let fixed = Vector::new([1, 2, 3]);
    /// let dynamic = Vector::new(vec![1, 2, 3]);
    /// assert_eq!(fixed, dynamic);
    /// ```
    #[inline]
    pub const fn new(storage: S) -> Self {
        Self(storage)
    }

    #[inline]
    pub fn storage(&self) -> &S {
        &self.0
    }

    #[inline]
    pub fn into_storage(self) -> S {
        self.0
    }
}

impl<S: VectorStorage> Vector<S> {
    /// The length of the vector, if it is part of the type.
    pub const FIXED_SIZE: Option<usize> = <S::Dim as Dim>::FIXED;

    /// The storage category of this vector type.
    pub const KIND: StorageKind = S::KIND;

    /// Returns the number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.0.as_slice().len()
    }

    /// Returns the element at `index`, or [`None`] if it is out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<S::Elem> {
        self.0.as_slice().get(index).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[S::Elem] {
        self.0.as_slice()
    }

    /// Returns an iterator over copies of the elements.
    pub fn iter(&self) -> impl Iterator<Item = S::Elem> + '_ {
        self.0.as_slice().iter().copied()
    }

    /// Returns the squared length of this [`Vector`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use lazy_linalg::*;
    /// assert_eq!(vec2(4, 0).length_squared(), 16);
    /// ```
    pub fn length_squared(&self) -> S::Elem {
        self.iter().fold(<S::Elem>::ZERO, |acc, x| acc + x * x)
    }

    /// Returns the length of this [`Vector`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use lazy_linalg::*;
    /// assert_eq!(vec3(0.0, 3.0, 4.0).length(), 5.0);
    /// ```
    pub fn length(&self) -> S::Elem
    where
        S::Elem: Sqrt,
    {
        self.length_squared().sqrt()
    }

    /// Unary plus. Returns an expression with the same elements as `self`.
    pub fn pos(&self) -> VectorXpr<UnaryOp<op::Pos, &Self>> {
        VectorXpr::new(UnaryOp::new(op::Pos, self))
    }
}

impl<S: VectorStorageMut> Vector<S> {
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [S::Elem] {
        self.0.as_mut_slice()
    }

    /// Divides this vector by its length in place, resulting in a unit vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lazy_linalg::*;
    /// let mut v = vec3(0.0, 0.0, 4.0);
    /// v.normalize();
    /// assert_eq!(v, vec3(0.0, 0.0, 1.0));
    /// ```
    pub fn normalize(&mut self) -> &mut Self
    where
        S::Elem: Sqrt,
    {
        let length = self.length();
        for elem in self.as_mut_slice() {
            *elem = *elem / length;
        }
        self
    }
}

impl<E: Scalar, const N: usize> Vector<[E; N]> {
    /// A vector with every element set to zero.
    #[inline]
    pub fn zeros() -> Self {
        Self([E::ZERO; N])
    }

    /// Creates a vector with each element initialized to `elem`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lazy_linalg::*;
    /// let v = Vec3::splat(2);
    /// assert_eq!(v, vec3(2, 2, 2));
    /// ```
    #[inline]
    pub fn splat(elem: E) -> Self {
        Self([elem; N])
    }

    /// Creates a vector where each element is initialized by invoking a closure with its index.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lazy_linalg::*;
    /// let v = Vec3::from_fn(|i| i as i32 + 100);
    /// assert_eq!(v, vec3(100, 101, 102));
    /// ```
    pub fn from_fn<F>(cb: F) -> Self
    where
        F: FnMut(usize) -> E,
    {
        Self(array::from_fn(cb))
    }

    #[inline]
    pub const fn as_array(&self) -> &[E; N] {
        &self.0
    }

    #[inline]
    pub fn into_array(self) -> [E; N] {
        self.0
    }
}

impl<E: Scalar> Vector<Vec<E>> {
    /// Creates a dynamic vector of `len` zeros.
    pub fn zeros(len: usize) -> Self {
        Self(vec![E::ZERO; len])
    }

    /// Creates a dynamic vector taking ownership of `elems`.
    #[inline]
    pub fn from_vec(elems: Vec<E>) -> Self {
        Self(elems)
    }

    /// Creates a dynamic vector of length `len` by invoking a closure with each index.
    pub fn from_fn<F>(len: usize, cb: F) -> Self
    where
        F: FnMut(usize) -> E,
    {
        Self((0..len).map(cb).collect())
    }

    /// Changes the length of this vector. New elements are zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lazy_linalg::*;
    /// let mut v = DynVector::from_vec(vec![1, 2]);
    /// v.resize(4);
    /// assert_eq!(v.as_slice(), &[1, 2, 0, 0]);
    /// ```
    pub fn resize(&mut self, len: usize) {
        log::trace!("resizing dynamic vector from {} to {} elements", self.0.len(), len);
        self.0.resize(len, E::ZERO);
    }

    #[inline]
    pub fn into_vec(self) -> Vec<E> {
        self.0
    }
}

impl<'a, E: Scalar> Vector<&'a mut [E]> {
    /// Uses `buf` as the storage of a vector of length `buf.len()`.
    ///
    /// Writes through the vector go straight to `buf`. Assigning a value of a different length
    /// fails instead of resizing.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lazy_linalg::*;
    /// let mut buf = [0.0f64; 3];
    /// Vector::external(&mut buf[..]).assign(vec3(1.0f64, 2.0, 3.0) * 2.0f64);
    /// assert_eq!(buf, [2.0, 4.0, 6.0]);
    /// ```
    #[inline]
    pub fn external(buf: &'a mut [E]) -> Self {
        Self(buf)
    }
}

impl<'a, E: Scalar, const N: usize> Vector<&'a mut [E; N]> {
    /// Uses `buf` as the storage of a vector whose length is known at compile time.
    #[inline]
    pub fn external_fixed(buf: &'a mut [E; N]) -> Self {
        Self(buf)
    }
}

impl<'a, E: Scalar> Vector<&'a [E]> {
    /// Views `buf` as a read-only vector.
    #[inline]
    pub fn view(buf: &'a [E]) -> Self {
        Self(buf)
    }

    /// Views `elems` as a read-only vector, checking that it holds `len` elements.
    pub fn view_exact(elems: &'a [E], len: usize) -> Result<Self> {
        if elems.len() != len {
            return Err(SizeError::BufferSize {
                expected: len,
                actual: elems.len(),
            });
        }
        Ok(Self(elems))
    }
}

impl<S: VectorStorage> Expr for Vector<S> {
    type Elem = S::Elem;
    type Shape = VectorShape<S::Dim>;

    #[inline]
    fn shape(&self) -> Self::Shape {
        VectorShape(self.0.dim())
    }

    #[inline]
    fn at(&self, index: usize) -> S::Elem {
        self.0.as_slice()[index]
    }
}

impl<S: VectorStorage> IntoExpr for Vector<S> {
    type Node = Self;

    #[inline]
    fn into_expr(self) -> Self {
        self
    }
}

impl<'a, S: VectorStorage> IntoExpr for &'a Vector<S> {
    type Node = Self;

    #[inline]
    fn into_expr(self) -> Self {
        self
    }
}

impl<S: VectorStorageMut> Writable for Vector<S> {
    #[inline]
    fn fit(&mut self, (len, _): (usize, usize)) -> Result<()> {
        self.0.fit(len)
    }

    #[inline]
    fn set(&mut self, index: usize, value: S::Elem) {
        self.0.as_mut_slice()[index] = value;
    }
}

impl<E, const N: usize> From<[E; N]> for Vector<[E; N]> {
    #[inline]
    fn from(value: [E; N]) -> Self {
        Self(value)
    }
}

impl<E, const N: usize> From<Vector<[E; N]>> for [E; N] {
    #[inline]
    fn from(value: Vector<[E; N]>) -> Self {
        value.0
    }
}

impl<E> From<Vec<E>> for Vector<Vec<E>> {
    #[inline]
    fn from(value: Vec<E>) -> Self {
        Self(value)
    }
}

impl<S: VectorStorage> fmt::Debug for Vector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tup = f.debug_tuple("");
        for elem in self.as_slice() {
            tup.field(elem);
        }
        tup.finish()
    }
}

impl<S: VectorStorage> fmt::Display for Vector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.as_slice().iter().format(", "))
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn storage_kinds() {
        assert_eq!(Vec3::<f32>::KIND, StorageKind::Fixed);
        assert_eq!(DynVector::<f32>::KIND, StorageKind::Dynamic);
        assert_eq!(ExternalVector::<f32>::KIND, StorageKind::External);
        assert_eq!(VectorView::<f32>::KIND, StorageKind::External);
        assert_eq!(Vec3::<f32>::FIXED_SIZE, Some(3));
        assert_eq!(DynVector::<f32>::FIXED_SIZE, None);
    }

    #[test]
    fn formatting() {
        let v = vec3(1, -2, 3);
        assert_eq!(format!("{v}"), "(1, -2, 3)");
        assert_eq!(format!("{v:?}"), "(1, -2, 3)");
        assert_eq!(DynVector::<i32>::zeros(0).to_string(), "()");
    }

    #[test]
    fn mixed_storage_equality() {
        let buf = [1.0, 2.0];
        assert_eq!(Vector::view(&buf[..]), vec2(1.0, 2.0));
        assert_eq!(vec2(1.0, 2.0), [1.0, 2.0]);
        assert_ne!(DynVector::from_vec(vec![1.0]), vec2(1.0, 2.0));
    }

    #[test]
    fn view_exact_checks_length() {
        let buf = [1, 2, 3];
        assert!(Vector::view_exact(&buf[..], 3).is_ok());
        assert_eq!(
            Vector::view_exact(&buf[..], 2).unwrap_err(),
            SizeError::BufferSize {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn fixed_external_vector() {
        let mut buf = [1, 2, 3];
        let mut v = Vector::external_fixed(&mut buf);
        assert_eq!(ExternalFixedVector::<i32, 3>::FIXED_SIZE, Some(3));
        v.assign(vec3(3i32, 2, 1) * 10i32);
        v[0] += 1;
        assert_eq!(buf, [31, 20, 10]);
    }

    #[test]
    fn bytemuck_cast() {
        let vs = [vec2(1.0f32, 2.0), vec2(3.0, 4.0)];
        let flat: &[f32] = bytemuck::cast_slice(&vs);
        assert_eq!(flat, &[1.0, 2.0, 3.0, 4.0]);
    }
}

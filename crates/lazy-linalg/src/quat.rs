use std::{fmt, marker::PhantomData};

use crate::{
    assign::Writable,
    dim::Const,
    error::Result,
    expr::{ElemOf, Expr, IntoExpr, NodeOf, QuaternionXpr, ShapeOf, UnaryOp},
    func::ProductElemOf,
    layout::{ImaginaryFirst, Order},
    op::{self, BinaryTag},
    shape::{CheckShape, HamiltonShape, Materialize, QuaternionShape, Shape},
    storage::{VectorStorage, VectorStorageMut},
    traits::{Scalar, Sqrt, Zero},
    vector::Vec3,
};

mod ops;
mod view;

pub use view::*;

/// A quaternion with inline storage.
pub type Quat<E, O = ImaginaryFirst> = Quaternion<[E; 4], O>;
/// A quaternion backed by a caller-owned array.
pub type ExternalQuat<'a, E, O = ImaginaryFirst> = Quaternion<&'a mut [E; 4], O>;

/// A quaternion consisting of 3 imaginary numbers and a real number.
///
/// Components are addressed logically as `x`, `y`, `z` (the `i`, `j` and `k` imaginary parts,
/// indices 0 to 2) and `w` (the real part, index 3). The order tag `O` decides where they are
/// stored: [`ImaginaryFirst`] keeps them as `[x, y, z, w]`, [`RealFirst`](crate::RealFirst)
/// as `[w, x, y, z]`. Quaternions with different orders can be combined freely.
///
/// `+`, `-` and scalar `*` and `/` are elementwise and lazy. `*` between two quaternions is the
/// Hamilton product, evaluated right away.
///
/// ```
/// # use lazy_linalg::*;
/// let i = Quat::new(1i32, 0, 0, 0);
/// let j = Quat::new(0i32, 1, 0, 0);
/// assert_eq!(&i * &j, Quat::new(0, 0, 1, 0));
/// assert_eq!(&i * &i, Quat::new(0, 0, 0, -1));
/// ```
#[derive(Clone, Copy, Default)]
#[repr(transparent)]
pub struct Quaternion<S, O = ImaginaryFirst> {
    storage: S,
    order: PhantomData<O>,
}

#[rustfmt::skip]
unsafe impl<E: bytemuck::Zeroable, O: Order> bytemuck::Zeroable for Quaternion<[E; 4], O> {}
unsafe impl<E: bytemuck::Pod, O: Order> bytemuck::Pod for Quaternion<[E; 4], O> {}

impl<S> Quaternion<S, ImaginaryFirst> {
    /// Wraps storage holding the components as `[x, y, z, w]`.
    #[inline]
    pub const fn from_storage(storage: S) -> Self {
        Self::with_order(storage)
    }
}

impl<E: Scalar> Quaternion<[E; 4], ImaginaryFirst> {
    /// Creates a quaternion from its imaginary parts `x`, `y`, `z` and its real part `w`.
    #[inline]
    pub const fn new(x: E, y: E, z: E, w: E) -> Self {
        Self::with_order([x, y, z, w])
    }
}

impl<S, O> Quaternion<S, O> {
    /// Wraps storage holding the components in the order given by `O`.
    #[inline]
    pub const fn with_order(storage: S) -> Self {
        Self {
            storage,
            order: PhantomData,
        }
    }

    #[inline]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[inline]
    pub fn into_storage(self) -> S {
        self.storage
    }
}

impl<E: Scalar, O: Order> Quaternion<[E; 4], O> {
    /// A quaternion with every component set to zero.
    pub fn zeros() -> Self {
        Self::with_order([E::ZERO; 4])
    }

    /// The multiplicative identity.
    ///
    /// ```
    /// # use lazy_linalg::*;
    /// let q = Quat::new(1, 2, 3, 4);
    /// assert_eq!(&q * &Quat::<i32>::identity(), q);
    /// ```
    pub fn identity() -> Self {
        Self::from_parts(E::ONE, Vec3::zeros())
    }

    /// Creates a quaternion from its components, in logical order, whatever `O` is.
    pub fn from_xyzw(x: E, y: E, z: E, w: E) -> Self {
        let mut this = Self::zeros();
        for (component, value) in [x, y, z, w].into_iter().enumerate() {
            this[component] = value;
        }
        this
    }

    /// Creates a quaternion from its real part and its imaginary part.
    ///
    /// ```
    /// # use lazy_linalg::*;
    /// let q = Quat::<_, RealFirst>::from_parts(1.0, vec3(2.0, 3.0, 4.0));
    /// assert_eq!(q.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(q, Quat::new(2.0, 3.0, 4.0, 1.0));
    /// ```
    pub fn from_parts(real: E, imaginary: Vec3<E>) -> Self {
        Self::from_xyzw(imaginary[0], imaginary[1], imaginary[2], real)
    }
}

impl<S, O> Quaternion<S, O>
where
    S: VectorStorage<Dim = Const<4>>,
    O: Order,
{
    #[track_caller]
    fn slot(component: usize) -> usize {
        assert!(
            component < 4,
            "quaternion component {component} is out of bounds (expected 0 to 3)"
        );
        O::offset(component)
    }

    /// Returns the components in storage order.
    #[inline]
    pub fn as_slice(&self) -> &[S::Elem] {
        self.storage.as_slice()
    }

    /// Returns the logical component `component` (0 to 3 for `x`, `y`, `z`, `w`), or [`None`] if
    /// it is out of bounds.
    pub fn get(&self, component: usize) -> Option<S::Elem> {
        (component < 4).then(|| self.storage.as_slice()[O::offset(component)])
    }

    /// Returns the real part `w`.
    #[inline]
    pub fn real(&self) -> S::Elem {
        self[3]
    }

    /// Returns the imaginary part `(x, y, z)`.
    #[inline]
    pub fn imaginary(&self) -> Vec3<S::Elem> {
        Vec3::from_fn(|i| self[i])
    }

    /// Returns the conjugate, which negates the imaginary part.
    ///
    /// ```
    /// # use lazy_linalg::*;
    /// let q = Quat::new(1, 2, 3, 4);
    /// assert_eq!(q.conjugate(), Quat::new(-1, -2, -3, 4));
    /// ```
    pub fn conjugate(&self) -> Quaternion<[S::Elem; 4], O> {
        let imaginary = self.imaginary();
        Quaternion::<[S::Elem; 4], O>::from_parts(self.real(), Vec3::from_fn(|i| -imaginary[i]))
    }

    /// Returns the squared length (the sum of the squared components).
    pub fn length_squared(&self) -> S::Elem {
        self.as_slice()
            .iter()
            .fold(<S::Elem>::ZERO, |acc, &x| acc + x * x)
    }

    /// Returns the length of this quaternion.
    ///
    /// If the length is not equal to one, multiplying a vector with this quaternion will scale the
    /// vector in addition to rotating it.
    #[doc(alias = "norm", alias = "magnitude")]
    pub fn length(&self) -> S::Elem
    where
        S::Elem: Sqrt,
    {
        self.length_squared().sqrt()
    }

    /// Returns the multiplicative inverse: the conjugate divided by the squared length.
    ///
    /// The zero quaternion has no inverse. Floating-point components come out as NaN, integer
    /// division panics.
    ///
    /// ```
    /// # use lazy_linalg::*;
    /// let q = Quat::new(0.0f64, 2.0, 0.0, 0.0);
    /// assert_eq!(q.inverse(), Quat::new(0.0, -0.5, 0.0, 0.0));
    /// assert_eq!(&q * &q.inverse(), Quat::<f64>::identity());
    /// ```
    pub fn inverse(&self) -> Quaternion<[S::Elem; 4], O> {
        let length_squared = self.length_squared();
        let mut out = self.conjugate();
        for value in &mut out.storage {
            *value = *value / length_squared;
        }
        out
    }

    /// Unary plus. Returns an expression with the same components as `self`.
    pub fn pos(&self) -> QuaternionXpr<UnaryOp<op::Pos, &Self>> {
        QuaternionXpr::new(UnaryOp::new(op::Pos, self))
    }
}

impl<S, O> Quaternion<S, O>
where
    S: VectorStorageMut<Dim = Const<4>>,
    O: Order,
{
    /// Divides this quaternion by its length in place, resulting in a unit quaternion.
    ///
    /// ```
    /// # use lazy_linalg::*;
    /// let mut q = Quat::new(0.0f64, 0.0, 3.0, 4.0);
    /// q.normalize();
    /// assert_eq!(q, Quat::new(0.0, 0.0, 0.6, 0.8));
    /// ```
    pub fn normalize(&mut self) -> &mut Self
    where
        S::Elem: Sqrt,
    {
        let length = self.length();
        for value in self.storage.as_mut_slice() {
            *value = *value / length;
        }
        self
    }
}

/// The quaternion holding the Hamilton product of `A` and `B`.
pub type HamiltonProduct<A, B> = <<ShapeOf<NodeOf<A>> as CheckShape<ShapeOf<NodeOf<B>>>>::Output as Materialize<
    ProductElemOf<A, B>,
>>::Container;

/// Computes the Hamilton product `a * b` of two quaternions.
///
/// This is what `*` does between quaternions. The product is not commutative.
///
/// ```
/// # use lazy_linalg::*;
/// let a = Quat::new(1i32, 2, 3, 4);
/// let b = Quat::<i32, RealFirst>::from_xyzw(5, 6, 7, 8);
/// assert_eq!(hamilton(&a, &b), Quat::new(24, 48, 48, -6));
/// assert_eq!(hamilton(&b, &a), Quat::new(32, 32, 56, -6));
/// ```
pub fn hamilton<A, B>(a: A, b: B) -> HamiltonProduct<A, B>
where
    A: IntoExpr,
    B: IntoExpr,
    ShapeOf<NodeOf<A>>: CheckShape<ShapeOf<NodeOf<B>>> + HamiltonShape,
    ShapeOf<NodeOf<B>>: HamiltonShape,
    op::Mul: BinaryTag<ElemOf<NodeOf<A>>, ElemOf<NodeOf<B>>>,
    <ShapeOf<NodeOf<A>> as CheckShape<ShapeOf<NodeOf<B>>>>::Output:
        Materialize<ProductElemOf<A, B>>,
{
    const X: usize = 0;
    const Y: usize = 1;
    const Z: usize = 2;
    const W: usize = 3;

    let a = a.into_expr();
    let b = b.into_expr();
    let m = |i: usize, j: usize| op::Mul.apply(a.at(i), b.at(j));
    let components = [
        m(W, X) + m(X, W) + m(Y, Z) - m(Z, Y),
        m(W, Y) - m(X, Z) + m(Y, W) + m(Z, X),
        m(W, Z) + m(X, Y) - m(Y, X) + m(Z, W),
        m(W, W) - m(X, X) - m(Y, Y) - m(Z, Z),
    ];

    let shape = a.shape().merge(b.shape());
    let mut out = shape.allocate();
    for (component, value) in components.into_iter().enumerate() {
        <<ShapeOf<NodeOf<A>> as CheckShape<ShapeOf<NodeOf<B>>>>::Output as Materialize<
            ProductElemOf<A, B>,
        >>::store(&mut out, shape.index_at(component), value);
    }
    out
}

impl<S, O> std::ops::Index<usize> for Quaternion<S, O>
where
    S: VectorStorage<Dim = Const<4>>,
    O: Order,
{
    type Output = S::Elem;

    #[inline]
    #[track_caller]
    fn index(&self, component: usize) -> &Self::Output {
        &self.storage.as_slice()[Self::slot(component)]
    }
}

impl<S, O> std::ops::IndexMut<usize> for Quaternion<S, O>
where
    S: VectorStorageMut<Dim = Const<4>>,
    O: Order,
{
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, component: usize) -> &mut Self::Output {
        &mut self.storage.as_mut_slice()[Self::slot(component)]
    }
}

impl<S, O> Expr for Quaternion<S, O>
where
    S: VectorStorage<Dim = Const<4>>,
    O: Order,
{
    type Elem = S::Elem;
    type Shape = QuaternionShape<O>;

    #[inline]
    fn shape(&self) -> QuaternionShape<O> {
        QuaternionShape::new()
    }

    #[inline]
    fn at(&self, component: usize) -> S::Elem {
        self.storage.as_slice()[O::offset(component)]
    }
}

impl<S, O> IntoExpr for Quaternion<S, O>
where
    S: VectorStorage<Dim = Const<4>>,
    O: Order,
{
    type Node = Self;

    #[inline]
    fn into_expr(self) -> Self {
        self
    }
}

impl<'a, S, O> IntoExpr for &'a Quaternion<S, O>
where
    S: VectorStorage<Dim = Const<4>>,
    O: Order,
{
    type Node = Self;

    #[inline]
    fn into_expr(self) -> Self {
        self
    }
}

impl<S, O> Writable for Quaternion<S, O>
where
    S: VectorStorageMut<Dim = Const<4>>,
    O: Order,
{
    #[inline]
    fn fit(&mut self, (len, _): (usize, usize)) -> Result<()> {
        self.storage.fit(len)
    }

    #[inline]
    fn set(&mut self, component: usize, value: S::Elem) {
        self.storage.as_mut_slice()[O::offset(component)] = value;
    }
}

impl<S, O> fmt::Debug for Quaternion<S, O>
where
    S: VectorStorage<Dim = Const<4>>,
    O: Order,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quaternion")
            .field("x", &self[0])
            .field("y", &self[1])
            .field("z", &self[2])
            .field("w", &self[3])
            .finish()
    }
}

impl<S, O> fmt::Display for Quaternion<S, O>
where
    S: VectorStorage<Dim = Const<4>>,
    O: Order,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}i + {}j + {}k", self[3], self[0], self[1], self[2])
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn component_order() {
        let a = Quat::new(1, 2, 3, 4);
        let b = Quat::<i32, RealFirst>::from_xyzw(1, 2, 3, 4);
        assert_eq!(a.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(b.as_slice(), &[4, 1, 2, 3]);
        assert_eq!(a, b);
        assert_eq!((b.real(), b.imaginary()), (4, vec3(1, 2, 3)));
        assert_eq!(b.get(4), None);
    }

    #[test]
    fn mixed_orders_promote_to_default() {
        let a = Quat::new(1i32, 2, 3, 4);
        let b = Quat::<i32, RealFirst>::from_xyzw(1, 1, 1, 1);
        let sum = (&b + &a).eval();
        assert_eq!(sum.as_slice(), &[2, 3, 4, 5]);

        let same = (&b + &b).eval();
        assert_eq!(same.as_slice(), &[2, 2, 2, 2]);
        assert_eq!(same.real(), 2);
    }

    #[test]
    fn hamilton_units() {
        let i = Quat::new(1i32, 0, 0, 0);
        let j = Quat::new(0i32, 1, 0, 0);
        let k = Quat::new(0i32, 0, 1, 0);
        let minus_one = Quat::new(0i32, 0, 0, -1);
        assert_eq!(&i * &i, minus_one);
        assert_eq!(&j * &j, minus_one);
        assert_eq!(&k * &k, minus_one);
        assert_eq!(&i * &j, k);
        assert_eq!(&j * &i, (-&k).eval());
        assert_eq!(hamilton(&i, hamilton(&j, &k)), minus_one);
    }

    #[test]
    fn product_of_expressions() {
        let a = Quat::new(1.0f64, 0.0, 0.0, 1.0);
        let b = Quat::new(0.0f64, 1.0, 0.0, 1.0);
        let p = (&a + &b) * (&a - &b);
        assert_eq!(p, hamilton(Quat::new(1.0f64, 1.0, 0.0, 2.0), Quat::new(1.0f64, -1.0, 0.0, 0.0)));
    }

    #[test]
    fn conjugate_and_inverse() {
        let q = Quat::new(1.0f64, 2.0, 3.0, 4.0);
        assert_eq!(q.conjugate(), Quat::new(-1.0, -2.0, -3.0, 4.0));
        assert_eq!(q.length_squared(), 30.0);
        let one = &q * &q.inverse();
        approx::assert_relative_eq!(one, Quat::<f64>::identity(), epsilon = 1e-12);
    }

    #[test]
    fn external_storage() {
        let mut buf = [0.0f32; 4];
        let mut q = Quaternion::from_storage(&mut buf);
        q.assign(Quat::new(1.0f32, 2.0, 3.0, 4.0) * 2.0f32);
        q[3] = 0.5;
        assert_eq!(buf, [2.0, 4.0, 6.0, 0.5]);
    }

    #[test]
    fn formatting() {
        let q = Quat::new(1i32, 2, 3, 4);
        assert_eq!(q.to_string(), "4 + 1i + 2j + 3k");
        assert_eq!(format!("{q:?}"), "Quaternion { x: 1, y: 2, z: 3, w: 4 }");
    }

    #[test]
    fn field_views() {
        let mut q = Quat::new(1i32, 2, 3, 4);
        q.w = 10;
        assert_eq!((q.x, q.y, q.z, q.w), (1, 2, 3, 10));

        let mut r = Quat::<i32, RealFirst>::identity();
        r.x = 5;
        assert_eq!(r.as_slice(), &[1, 5, 0, 0]);
        assert_eq!(r.w, 1);
    }
}

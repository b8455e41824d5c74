//! Operator impls shared by containers and root wrappers.
//!
//! Each container module invokes these macros for its owned type, its borrowed type and its
//! root wrapper, choosing which operators build elementwise nodes and which have a
//! kind-specific meaning (matrix and quaternion products).

/// `Lhs op Rhs` for every [`IntoExpr`](crate::IntoExpr) right-hand side, building a lazy
/// [`BinaryOp`](crate::BinaryOp) after checking shapes.
macro_rules! elementwise_ops {
    ([$($gen:tt)*] $lhs:ty => $xpr:ident;) => {};
    ([$($gen:tt)*] $lhs:ty => $xpr:ident; ($trait:ident $method:ident $tag:ident) $($rest:tt)*) => {
        impl<$($gen)*, Rhs> ::std::ops::$trait<Rhs> for $lhs
        where
            $lhs: $crate::IntoExpr,
            Rhs: $crate::IntoExpr,
            $crate::ShapeOf<$crate::NodeOf<$lhs>>:
                $crate::CheckShape<$crate::ShapeOf<$crate::NodeOf<Rhs>>>,
            $crate::ShapeOf<$crate::NodeOf<Rhs>>:
                $crate::Shape<Index = $crate::IndexOf<$crate::NodeOf<$lhs>>>,
            $crate::op::$tag: $crate::op::BinaryTag<
                $crate::ElemOf<$crate::NodeOf<$lhs>>,
                $crate::ElemOf<$crate::NodeOf<Rhs>>,
            >,
        {
            type Output = $crate::$xpr<
                $crate::BinaryOp<$crate::op::$tag, $crate::NodeOf<$lhs>, $crate::NodeOf<Rhs>>,
            >;

            #[track_caller]
            fn $method(self, rhs: Rhs) -> Self::Output {
                let left = $crate::IntoExpr::into_expr(self);
                let right = $crate::IntoExpr::into_expr(rhs);
                match $crate::BinaryOp::try_new($crate::op::$tag, left, right) {
                    Ok(node) => $crate::$xpr::new(node),
                    Err(err) => panic!("{err}"),
                }
            }
        }

        elementwise_ops!([$($gen)*] $lhs => $xpr; $($rest)*);
    };
}

/// `Lhs * s`, `Lhs / s` and `s * Lhs` for scalars `s`, promoted against the operand's element
/// type like any other pair of elements.
macro_rules! scalar_ops {
    ([$($gen:tt)*] $lhs:ty => $xpr:ident;) => {};
    ([$($gen:tt)*] $lhs:ty => $xpr:ident; $t:ty $(, $rest:ty)*) => {
        scalar_ops!(@rhs [$($gen)*] $lhs => $xpr; $t; Mul mul);
        scalar_ops!(@rhs [$($gen)*] $lhs => $xpr; $t; Div div);

        impl<$($gen)*> ::std::ops::Mul<$lhs> for $t
        where
            $lhs: $crate::IntoExpr,
            $crate::op::Mul: $crate::op::BinaryTag<$t, $crate::ElemOf<$crate::NodeOf<$lhs>>>,
            $crate::ShapeOf<$crate::NodeOf<$lhs>>:
                $crate::CheckShape<$crate::ShapeOf<$crate::NodeOf<$lhs>>>,
        {
            type Output = $crate::$xpr<
                $crate::BinaryOp<
                    $crate::op::Mul,
                    $crate::Splat<$t, $crate::ShapeOf<$crate::NodeOf<$lhs>>>,
                    $crate::NodeOf<$lhs>,
                >,
            >;

            fn mul(self, rhs: $lhs) -> Self::Output {
                let node = $crate::IntoExpr::into_expr(rhs);
                let splat = $crate::Splat::new(self, $crate::Expr::shape(&node));
                $crate::$xpr::new($crate::BinaryOp::new_unchecked($crate::op::Mul, splat, node))
            }
        }

        scalar_ops!([$($gen)*] $lhs => $xpr; $($rest),*);
    };
    (@rhs [$($gen:tt)*] $lhs:ty => $xpr:ident; $t:ty; $trait:ident $method:ident) => {
        impl<$($gen)*> ::std::ops::$trait<$t> for $lhs
        where
            $lhs: $crate::IntoExpr,
            $crate::op::$trait: $crate::op::BinaryTag<$crate::ElemOf<$crate::NodeOf<$lhs>>, $t>,
            $crate::ShapeOf<$crate::NodeOf<$lhs>>:
                $crate::CheckShape<$crate::ShapeOf<$crate::NodeOf<$lhs>>>,
        {
            type Output = $crate::$xpr<
                $crate::BinaryOp<
                    $crate::op::$trait,
                    $crate::NodeOf<$lhs>,
                    $crate::Splat<$t, $crate::ShapeOf<$crate::NodeOf<$lhs>>>,
                >,
            >;

            fn $method(self, rhs: $t) -> Self::Output {
                let node = $crate::IntoExpr::into_expr(self);
                let splat = $crate::Splat::new(rhs, $crate::Expr::shape(&node));
                $crate::$xpr::new($crate::BinaryOp::new_unchecked($crate::op::$trait, node, splat))
            }
        }
    };
}

/// `Lhs * Rhs` as a matrix product, evaluated right away by [`mul`](crate::mul).
macro_rules! product_ops {
    ([$($gen:tt)*] $lhs:ty) => {
        impl<$($gen)*, Rhs> ::std::ops::Mul<Rhs> for $lhs
        where
            $lhs: $crate::IntoExpr,
            Rhs: $crate::IntoExpr,
            $crate::ShapeOf<$crate::NodeOf<$lhs>>:
                $crate::ProductShape<$crate::ShapeOf<$crate::NodeOf<Rhs>>>,
            $crate::op::Mul: $crate::op::BinaryTag<
                $crate::ElemOf<$crate::NodeOf<$lhs>>,
                $crate::ElemOf<$crate::NodeOf<Rhs>>,
            >,
            $crate::ProductShapeOf<$lhs, Rhs>:
                $crate::Materialize<$crate::ProductElemOf<$lhs, Rhs>>,
        {
            type Output = $crate::Product<$lhs, Rhs>;

            #[track_caller]
            fn mul(self, rhs: Rhs) -> Self::Output {
                $crate::mul(self, rhs)
            }
        }
    };
}

/// `Lhs * Rhs` as a Hamilton product, evaluated right away by [`hamilton`](crate::hamilton).
macro_rules! hamilton_ops {
    ([$($gen:tt)*] $lhs:ty) => {
        impl<$($gen)*, Rhs> ::std::ops::Mul<Rhs> for $lhs
        where
            $lhs: $crate::IntoExpr,
            Rhs: $crate::IntoExpr,
            $crate::ShapeOf<$crate::NodeOf<$lhs>>:
                $crate::CheckShape<$crate::ShapeOf<$crate::NodeOf<Rhs>>> + $crate::HamiltonShape,
            $crate::ShapeOf<$crate::NodeOf<Rhs>>: $crate::HamiltonShape,
            $crate::op::Mul: $crate::op::BinaryTag<
                $crate::ElemOf<$crate::NodeOf<$lhs>>,
                $crate::ElemOf<$crate::NodeOf<Rhs>>,
            >,
            <$crate::ShapeOf<$crate::NodeOf<$lhs>> as $crate::CheckShape<
                $crate::ShapeOf<$crate::NodeOf<Rhs>>,
            >>::Output: $crate::Materialize<$crate::ProductElemOf<$lhs, Rhs>>,
        {
            type Output = $crate::HamiltonProduct<$lhs, Rhs>;

            #[inline]
            fn mul(self, rhs: Rhs) -> Self::Output {
                $crate::hamilton(self, rhs)
            }
        }
    };
}

/// Unary `-Lhs`.
macro_rules! neg_op {
    ([$($gen:tt)*] $lhs:ty => $xpr:ident) => {
        impl<$($gen)*> ::std::ops::Neg for $lhs
        where
            $lhs: $crate::IntoExpr,
            $crate::op::Neg: $crate::op::UnaryTag<$crate::ElemOf<$crate::NodeOf<$lhs>>>,
        {
            type Output = $crate::$xpr<$crate::UnaryOp<$crate::op::Neg, $crate::NodeOf<$lhs>>>;

            #[inline]
            fn neg(self) -> Self::Output {
                $crate::$xpr::new($crate::UnaryOp::new(
                    $crate::op::Neg,
                    $crate::IntoExpr::into_expr(self),
                ))
            }
        }
    };
}

/// `Lhs op= Rhs` for writable containers, applied in place without resizing.
macro_rules! compound_ops {
    ([$($gen:tt)*] $lhs:ty;) => {};
    ([$($gen:tt)*] $lhs:ty; ($trait:ident $method:ident $tag:ident) $($rest:tt)*) => {
        impl<$($gen)*, Rhs> ::std::ops::$trait<Rhs> for $lhs
        where
            $lhs: $crate::Writable,
            Rhs: $crate::IntoExpr,
            $crate::ShapeOf<$lhs>: $crate::CheckShape<$crate::ShapeOf<$crate::NodeOf<Rhs>>>,
            $crate::ShapeOf<$crate::NodeOf<Rhs>>: $crate::Shape<Index = $crate::IndexOf<$lhs>>,
            $crate::op::$tag: $crate::op::BinaryTag<
                $crate::ElemOf<$lhs>,
                $crate::ElemOf<$crate::NodeOf<Rhs>>,
                Output = $crate::ElemOf<$lhs>,
            >,
        {
            #[track_caller]
            fn $method(&mut self, rhs: Rhs) {
                if let Err(err) = $crate::Writable::try_update(self, $crate::op::$tag, rhs) {
                    panic!("{err}");
                }
            }
        }

        compound_ops!([$($gen)*] $lhs; $($rest)*);
    };
}

/// `Lhs *= s` and `Lhs /= s` for scalars that combine with the element type without widening it.
macro_rules! scalar_compound_ops {
    ([$($gen:tt)*] $lhs:ty;) => {};
    ([$($gen:tt)*] $lhs:ty; $t:ty $(, $rest:ty)*) => {
        scalar_compound_ops!(@one [$($gen)*] $lhs; $t; MulAssign mul_assign Mul);
        scalar_compound_ops!(@one [$($gen)*] $lhs; $t; DivAssign div_assign Div);
        scalar_compound_ops!([$($gen)*] $lhs; $($rest),*);
    };
    (@one [$($gen:tt)*] $lhs:ty; $t:ty; $trait:ident $method:ident $tag:ident) => {
        impl<$($gen)*> ::std::ops::$trait<$t> for $lhs
        where
            $lhs: $crate::Writable,
            $crate::ShapeOf<$lhs>: $crate::CheckShape<$crate::ShapeOf<$lhs>>,
            $crate::op::$tag: $crate::op::BinaryTag<$crate::ElemOf<$lhs>, $t, Output = $crate::ElemOf<$lhs>>,
        {
            fn $method(&mut self, rhs: $t) {
                let splat = $crate::Splat::new(rhs, $crate::Expr::shape(&*self));
                if let Err(err) = $crate::Writable::try_update(self, $crate::op::$tag, splat) {
                    panic!("{err}");
                }
            }
        }
    };
}

pub(crate) use compound_ops;
pub(crate) use elementwise_ops;
pub(crate) use hamilton_ops;
pub(crate) use neg_op;
pub(crate) use product_ops;
pub(crate) use scalar_compound_ops;
pub(crate) use scalar_ops;

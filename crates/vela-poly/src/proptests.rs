//! Property-based tests for polynomial arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::poly::Polynomial;

    // Integer-valued coefficients keep ring-law checks exact in f64.
    fn small_coeff() -> impl Strategy<Value = f64> {
        (-50i64..50).prop_map(|n| n as f64)
    }

    // 1D polynomials of degree at most 4.
    fn small_poly_1d() -> impl Strategy<Value = Polynomial> {
        proptest::collection::vec(small_coeff(), 1..=5).prop_map(|coeffs| {
            let mut p = Polynomial::new(1).unwrap();
            for (i, c) in coeffs.into_iter().enumerate() {
                p.set_coefficient(&[i as u32], c).unwrap();
            }
            p
        })
    }

    // Sparse 2D polynomials with a handful of low-degree terms.
    fn small_poly_2d() -> impl Strategy<Value = Polynomial> {
        proptest::collection::vec(((0u32..4, 0u32..4), small_coeff()), 0..=6).prop_map(|terms| {
            let mut p = Polynomial::new(2).unwrap();
            for ((i, j), c) in terms {
                p.set_coefficient(&[i, j], c).unwrap();
            }
            p
        })
    }

    fn nonzero_poly_1d() -> impl Strategy<Value = Polynomial> {
        small_poly_1d().prop_filter("polynomial must be non-zero", |p| !p.is_zero())
    }

    proptest! {
        // Ring axioms

        #[test]
        fn poly_add_commutative(a in small_poly_1d(), b in small_poly_1d()) {
            prop_assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
        }

        #[test]
        fn poly_add_associative(a in small_poly_1d(), b in small_poly_1d(), c in small_poly_1d()) {
            prop_assert_eq!(
                a.add(&b).unwrap().add(&c).unwrap(),
                a.add(&b.add(&c).unwrap()).unwrap()
            );
        }

        #[test]
        fn poly_mul_commutative(a in small_poly_1d(), b in small_poly_1d()) {
            prop_assert_eq!(a.mul(&b).unwrap(), b.mul(&a).unwrap());
        }

        #[test]
        fn poly_mul_commutative_2d(a in small_poly_2d(), b in small_poly_2d()) {
            prop_assert_eq!(a.mul(&b).unwrap(), b.mul(&a).unwrap());
        }

        #[test]
        fn poly_distributive(a in small_poly_1d(), b in small_poly_1d(), c in small_poly_1d()) {
            // a * (b + c) = a * b + a * c
            let left = a.mul(&b.add(&c).unwrap()).unwrap();
            let right = a.mul(&b).unwrap().add(&a.mul(&c).unwrap()).unwrap();
            prop_assert!(left.approx_eq(&right, 1e-9));
        }

        #[test]
        fn poly_add_identity(a in small_poly_1d()) {
            let zero = Polynomial::new(1).unwrap();
            prop_assert_eq!(a.add(&zero).unwrap(), a.clone());
            prop_assert_eq!(zero.add(&a).unwrap(), a);
        }

        #[test]
        fn poly_sub_self_is_zero(a in small_poly_2d()) {
            prop_assert!(a.sub(&a).unwrap().is_zero());
        }

        #[test]
        fn poly_mul_zero(a in small_poly_1d()) {
            let zero = Polynomial::new(1).unwrap();
            prop_assert!(a.mul(&zero).unwrap().is_zero());
            prop_assert!(zero.mul(&a).unwrap().is_zero());
        }

        // Degree laws

        #[test]
        fn poly_mul_degree(a in nonzero_poly_1d(), b in nonzero_poly_1d()) {
            // deg(a * b) = deg(a) + deg(b) over a domain
            let product = a.mul(&b).unwrap();
            prop_assert_eq!(product.degree(), a.degree() + b.degree());
        }

        #[test]
        fn poly_add_degree_bound(a in small_poly_1d(), b in small_poly_1d()) {
            let sum = a.add(&b).unwrap();
            prop_assert!(sum.degree() <= a.degree().max(b.degree()));
        }

        // Evaluation homomorphism

        #[test]
        fn poly_eval_add(a in small_poly_1d(), b in small_poly_1d(), x in -10.0f64..10.0) {
            let sum = a.add(&b).unwrap();
            let direct = a.eval_1d(x).unwrap() + b.eval_1d(x).unwrap();
            prop_assert!((sum.eval_1d(x).unwrap() - direct).abs() < 1e-6);
        }

        #[test]
        fn poly_eval_mul(a in small_poly_1d(), b in small_poly_1d(), x in -4.0f64..4.0) {
            let product = a.mul(&b).unwrap();
            let direct = a.eval_1d(x).unwrap() * b.eval_1d(x).unwrap();
            let scale = direct.abs().max(1.0);
            prop_assert!((product.eval_1d(x).unwrap() - direct).abs() < 1e-9 * scale);
        }

        // Structural invariants

        #[test]
        fn poly_set_then_get(powers in proptest::collection::vec(0u32..6, 2), c in small_coeff()) {
            let mut p = Polynomial::new(2).unwrap();
            p.set_coefficient(&powers, c).unwrap();
            prop_assert_eq!(p.coefficient(&powers).unwrap(), c);
            if c != 0.0 {
                prop_assert_eq!(p.degree(), powers.iter().sum::<u32>());
            } else {
                prop_assert!(p.is_zero());
            }
        }

        #[test]
        fn poly_shift_roundtrip(a in small_poly_2d(), offset in -3i64..=3) {
            let mut shifted = a.clone();
            let u = offset as f64;
            shifted.shift(1, u).unwrap();
            shifted.shift(1, -u).unwrap();
            // Integer offsets keep the binomial recurrence exact.
            prop_assert_eq!(shifted, a);
        }
    }
}

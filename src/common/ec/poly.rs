use std::sync::Arc;

use super::galois::GaloisField;

// Polynomial
//------------------------------------------------------------------------------

// Immutable polynomial over a Galois field, highest degree coefficient first.
// Leading zeros are trimmed except for the zero polynomial [0].
#[derive(Debug, Clone)]
pub struct Polynomial {
    field: Arc<GaloisField>,
    coefficients: Vec<usize>,
}

impl Polynomial {
    pub fn new(field: Arc<GaloisField>, coefficients: Vec<usize>) -> Self {
        if coefficients.is_empty() {
            return field.zero();
        }

        let lead = coefficients.iter().position(|&c| c != 0).unwrap_or(coefficients.len() - 1);
        let coefficients = if lead > 0 { coefficients[lead..].to_vec() } else { coefficients };
        Self { field, coefficients }
    }

    pub fn monomial(field: Arc<GaloisField>, degree: usize, coeff: usize) -> Self {
        if coeff == 0 {
            return field.zero();
        }
        let mut coefficients = vec![0; degree + 1];
        coefficients[0] = coeff;
        Self::new(field, coefficients)
    }

    pub fn field(&self) -> &Arc<GaloisField> {
        &self.field
    }

    pub fn coefficients(&self) -> &[usize] {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients[0] == 0
    }

    // Coefficient of x^degree
    pub fn coefficient_at(&self, degree: usize) -> usize {
        assert!(
            degree <= self.degree(),
            "Degree out of range: Polynomial degree {}, Requested {degree}",
            self.degree()
        );
        self.coefficients[self.degree() - degree]
    }
}

impl PartialEq for Polynomial {
    fn eq(&self, other: &Self) -> bool {
        self.coefficients == other.coefficients
    }
}

impl Eq for Polynomial {}

// Arithmetic
//------------------------------------------------------------------------------

impl Polynomial {
    pub fn add_or_subtract(&self, other: &Self) -> Self {
        if self.is_zero() {
            return other.clone();
        } else if other.is_zero() {
            return self.clone();
        }

        let (small, large) = if self.coefficients.len() > other.coefficients.len() {
            (&other.coefficients, &self.coefficients)
        } else {
            (&self.coefficients, &other.coefficients)
        };
        let len_diff = large.len() - small.len();

        let mut sum = large.clone();
        for (s, &c) in sum[len_diff..].iter_mut().zip(small.iter()) {
            *s = self.field.add_or_sub(*s, c);
        }
        Self::new(Arc::clone(&self.field), sum)
    }

    pub fn multiply_by_monomial(&self, degree: usize, coeff: usize) -> Self {
        if coeff == 0 {
            return self.field.zero();
        }
        let mut product = vec![0; self.coefficients.len() + degree];
        for (p, &c) in product.iter_mut().zip(self.coefficients.iter()) {
            *p = self.field.multiply(c, coeff);
        }
        Self::new(Arc::clone(&self.field), product)
    }

    pub fn multiply(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return self.field.zero();
        }
        let gf = &self.field;
        let mut product = vec![0; self.coefficients.len() + other.coefficients.len() - 1];
        for (i, &a) in self.coefficients.iter().enumerate() {
            for (j, &b) in other.coefficients.iter().enumerate() {
                product[i + j] = gf.add_or_sub(product[i + j], gf.multiply(a, b));
            }
        }
        Self::new(Arc::clone(gf), product)
    }

    // Euclidean long division, returns (quotient, remainder)
    pub fn divide(&self, other: &Self) -> (Self, Self) {
        assert!(!other.is_zero(), "Division by zero polynomial");

        let gf = &self.field;
        let inv_lead = gf.inverse(other.coefficient_at(other.degree()));

        let mut quotient = gf.zero();
        let mut remainder = self.clone();
        while remainder.degree() >= other.degree() && !remainder.is_zero() {
            let degree_diff = remainder.degree() - other.degree();
            let scale = gf.multiply(remainder.coefficient_at(remainder.degree()), inv_lead);
            let term = other.multiply_by_monomial(degree_diff, scale);
            let iter_quotient = Self::monomial(Arc::clone(gf), degree_diff, scale);
            quotient = quotient.add_or_subtract(&iter_quotient);
            remainder = remainder.add_or_subtract(&term);
        }
        (quotient, remainder)
    }
}

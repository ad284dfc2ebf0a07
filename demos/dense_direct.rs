use densela::{cholesky, loosely_equal, permutation_matrix, plu, qr_decomposition, Matrix, QrMode};
use rand::Rng;

fn main() -> Result<(), densela::LinalgError> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let n = 10;
    // build a random SPD matrix: A = M·Mᵀ + I
    let mut rng = rand::thread_rng();
    let m = Matrix::from_fn(n, n, |_, _| rng.r#gen::<f64>())?;
    let mut a = (&m * &m.transposed())?;
    for i in 0..n {
        a[(i, i)] += 1.0;
    }
    println!("A =\n{a}");
    println!("properties: {:?}", a.properties());

    // PLU
    let lu = plu(&a)?;
    let pa = (&permutation_matrix::<f64>(&lu.p)? * &a)?;
    println!("PLU p = {:?}, P·A = L·U: {}", lu.p, loosely_equal(&pa, &(&lu.l * &lu.u)?, 1e-9));

    // Cholesky
    let l = cholesky(&a)?;
    println!("Cholesky L·Lᵀ = A: {}", loosely_equal(&(&l * &l.transposed())?, &a, 1e-9));

    // thin QR of the first three columns
    let tall = a.view(0, 0, n, 3)?.to_matrix();
    let qr = qr_decomposition(&tall, QrMode::empty())?;
    println!("QR R =\n{}", qr.r);
    println!("QR Q·R = A: {}", loosely_equal(&(&qr.q * &qr.r)?, &tall, 1e-9));

    Ok(())
}

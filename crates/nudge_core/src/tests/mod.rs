mod magnitude;
